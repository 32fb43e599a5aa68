use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use flagreel::{Config, FilterRule, GlyphGenerator, LayoutMode, LocaleCode, pipeline};

#[derive(Parser, Debug)]
#[command(name = "flagreel", version, about = "Locale-code glyphs and looping scroll banners")]
struct Cli {
    /// Log debug output (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write `<code>.png` and `<code>.svg` for every locale code.
    Flags(FlagsArgs),
    /// Build the scroll banner GIF from a flags directory.
    Banner(BannerArgs),
    /// Generate glyphs in memory and build the banner in one go.
    Run(RunArgs),
    /// Print the glyph plan of one code.
    Plan(PlanArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Rings,
    Hexagons,
    Sectors,
}

impl From<ModeChoice> for LayoutMode {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Rings => LayoutMode::Rings,
            ModeChoice::Hexagons => LayoutMode::Hexagons,
            ModeChoice::Sectors => LayoutMode::Sectors,
        }
    }
}

#[derive(Args, Debug, Default)]
struct GlyphArgs {
    /// Configuration JSON; flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Glyph layout.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Glyph size in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Locale list file (JSON array or one code per line); bundled table otherwise.
    #[arg(long)]
    list: Option<PathBuf>,

    /// Render glyphs on a single thread.
    #[arg(long)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug, Default)]
struct BannerOpts {
    /// Cells per row.
    #[arg(long)]
    columns: Option<u32>,

    /// Rows visible at once.
    #[arg(long)]
    visible_rows: Option<u32>,

    /// Pixels scrolled per frame.
    #[arg(long)]
    scroll_step: Option<u32>,

    /// Delay between frames in milliseconds.
    #[arg(long)]
    delay_ms: Option<u32>,

    /// Keep at most this many codes.
    #[arg(long)]
    limit: Option<usize>,

    /// Keep every code instead of only those whose language and region parts match.
    #[arg(long)]
    all_codes: bool,

    /// Label font file (TTF/OTF); system fonts are searched otherwise.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Do not draw labels.
    #[arg(long)]
    no_labels: bool,
}

#[derive(Args, Debug)]
struct FlagsArgs {
    /// Output directory; stale `.png`/`.svg` files in it are removed.
    #[arg(long, default_value = "flags")]
    out: PathBuf,

    #[command(flatten)]
    glyph: GlyphArgs,
}

#[derive(Args, Debug)]
struct BannerArgs {
    /// Directory of glyph files written by `flags`.
    #[arg(long, default_value = "flags")]
    flags: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Configuration JSON; flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    banner: BannerOpts,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Also write glyph files to this directory.
    #[arg(long)]
    flags: Option<PathBuf>,

    #[command(flatten)]
    glyph: GlyphArgs,

    #[command(flatten)]
    banner: BannerOpts,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Locale code, e.g. `de-DE`.
    code: String,

    /// Glyph layout.
    #[arg(long, value_enum, default_value_t = ModeChoice::Rings)]
    mode: ModeChoice,

    /// Outer radius in plan units.
    #[arg(long, default_value_t = 128.0)]
    max_extent: f64,

    /// Print the plan as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Flags(args) => cmd_flags(args),
        Command::Banner(args) => cmd_banner(args),
        Command::Run(args) => cmd_run(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flagreel={default_level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::from_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(Config::default()),
    }
}

fn apply_glyph_args(config: &mut Config, args: &GlyphArgs) {
    if let Some(mode) = args.mode {
        config.glyphs.mode = mode.into();
    }
    if let Some(size) = args.size {
        config.glyphs.size = size;
    }
    if let Some(list) = &args.list {
        config.locales = Some(list.clone());
    }
    if args.sequential {
        config.glyphs.parallel = false;
    }
    if args.threads.is_some() {
        config.glyphs.threads = args.threads;
    }
}

fn apply_banner_opts(config: &mut Config, opts: &BannerOpts) {
    if let Some(columns) = opts.columns {
        config.banner.columns = columns;
    }
    if let Some(rows) = opts.visible_rows {
        config.banner.visible_rows = rows;
    }
    if let Some(step) = opts.scroll_step {
        config.banner.scroll_step = step;
    }
    if let Some(delay) = opts.delay_ms {
        config.frame_delay_ms = delay;
    }
    if opts.limit.is_some() {
        config.select.limit = opts.limit;
    }
    if opts.all_codes {
        config.select.rule = FilterRule::All;
    }
    if let Some(font) = &opts.font {
        config.font = Some(font.clone());
    }
    if opts.no_labels {
        config.labels = false;
    }
}

fn print_banner_report(report: &pipeline::BannerReport) {
    eprintln!("included ({}):", report.selected.len());
    for code in &report.selected {
        eprintln!("- {code}");
    }
    eprintln!("excluded ({}):", report.excluded.len());
    for e in &report.excluded {
        eprintln!("- {}: {}", e.code, e.reason);
    }
    eprintln!("wrote {} ({} frames)", report.out.display(), report.frames);
}

fn cmd_flags(args: FlagsArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.glyph.config.as_ref())?;
    apply_glyph_args(&mut config, &args.glyph);
    let provider = pipeline::provider_for(&config);
    let report = pipeline::generate_flags(provider.as_ref(), &args.out, &config)?;
    for f in &report.failures {
        eprintln!("failed {}: {}", f.code, f.error);
    }
    eprintln!(
        "wrote {} files to {}",
        report.written.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_banner(args: BannerArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    apply_banner_opts(&mut config, &args.banner);
    let report = pipeline::banner_from_dir(&args.flags, &args.out, &config)?;
    print_banner_report(&report);
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.glyph.config.as_ref())?;
    apply_glyph_args(&mut config, &args.glyph);
    apply_banner_opts(&mut config, &args.banner);
    let provider = pipeline::provider_for(&config);
    let report = pipeline::run(
        provider.as_ref(),
        &args.out,
        args.flags.as_deref(),
        &config,
    )?;
    for code in &report.failures {
        eprintln!("failed: '{code}'");
    }
    print_banner_report(&report.banner);
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let code = LocaleCode::parse(&args.code)?;
    let plan = GlyphGenerator::default().plan_for(&code, args.mode.into(), args.max_extent)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("code: {} -> {}", code, plan.code);
    println!("mode: {:?}", plan.mode);
    println!(
        "chars: {}",
        plan.segments
            .iter()
            .map(|s| s.ch.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    if let Some(w) = plan.band_width() {
        println!("segment width: {w:.2}");
    }
    for (i, seg) in plan.segments.iter().enumerate() {
        let rgba = seg.color.to_rgba8();
        let extent = match seg.extent {
            flagreel::glyph::plan::Extent::Radial { outer, inner } => {
                format!("outer {outer:.2} inner {inner:.2}")
            }
            flagreel::glyph::plan::Extent::Angular { start, sweep } => format!(
                "start {:.1}deg sweep {:.1}deg",
                start.to_degrees(),
                sweep.to_degrees()
            ),
        };
        println!(
            "{i:>2} {} {} {} {extent}",
            seg.ch,
            seg.color.to_css(),
            rgba.to_hex_rgb()
        );
    }
    println!(
        "center dot: radius {} {}",
        plan.center_dot.radius,
        plan.center_dot.color.to_hex_rgb()
    );
    Ok(())
}
