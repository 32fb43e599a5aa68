use super::*;
use crate::foundation::core::Canvas;
use image::AnimationDecoder as _;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("gif_sink").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn cfg(frame_count: u64) -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 4,
        frame_count,
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_a_decodable_looping_gif() {
    let dir = scratch_dir("ok");
    let out = dir.join("banner.gif");
    let mut opts = GifSinkOpts::new(&out);
    opts.frame_delay_ms = 40;
    let mut sink = GifSink::new(opts).unwrap();

    let canvas = Canvas::new(8, 4).unwrap();
    sink.begin(cfg(3)).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRGBA::solid(canvas, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &FrameRGBA::solid(canvas, [0, 0, 255, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(2), &FrameRGBA::transparent(canvas))
        .unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 3);

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    // NETSCAPE2.0 application extension carries the loop count.
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (8, 4));
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 40);

    let first = frames[0].buffer().get_pixel(3, 2).0;
    assert!(first[0] > 200 && first[2] < 50, "{first:?}");
    // Transparent input is flattened onto the white background.
    let last = frames[2].buffer().get_pixel(0, 0).0;
    assert!(last.iter().take(3).all(|&c| c > 200), "{last:?}");

    assert_eq!(entries(&dir), ["banner.gif"]);
}

#[test]
fn dropping_an_unfinished_sink_leaves_nothing_behind() {
    let dir = scratch_dir("dropped");
    let out = dir.join("banner.gif");
    {
        let mut sink = GifSink::new(GifSinkOpts::new(&out)).unwrap();
        sink.begin(cfg(2)).unwrap();
        sink.push_frame(
            FrameIndex(0),
            &FrameRGBA::solid(Canvas::new(8, 4).unwrap(), [0, 0, 0, 255]),
        )
        .unwrap();
    }
    assert!(entries(&dir).is_empty());
}

#[test]
fn failed_push_then_drop_leaves_nothing_behind() {
    let dir = scratch_dir("bad_frame");
    let out = dir.join("banner.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out)).unwrap();
    sink.begin(cfg(1)).unwrap();
    let wrong = FrameRGBA::transparent(Canvas::new(4, 4).unwrap());
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &wrong),
        Err(FlagreelError::Encode(_))
    ));
    drop(sink);
    assert!(entries(&dir).is_empty());
}

#[test]
fn end_without_frames_fails_and_cleans_up() {
    let dir = scratch_dir("empty");
    let out = dir.join("banner.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out)).unwrap();
    sink.begin(cfg(0)).unwrap();
    assert!(sink.end().is_err());
    assert!(entries(&dir).is_empty());
}

#[test]
fn frames_must_increase() {
    let dir = scratch_dir("order");
    let mut sink = GifSink::new(GifSinkOpts::new(dir.join("x.gif"))).unwrap();
    let frame = FrameRGBA::solid(Canvas::new(8, 4).unwrap(), [0, 0, 0, 255]);
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    sink.begin(cfg(2)).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
}

#[test]
fn refuses_to_overwrite_when_asked() {
    let dir = scratch_dir("no_overwrite");
    let out = dir.join("banner.gif");
    std::fs::write(&out, b"keep").unwrap();
    let mut opts = GifSinkOpts::new(&out);
    opts.overwrite = false;
    let mut sink = GifSink::new(opts).unwrap();
    assert!(matches!(
        sink.begin(cfg(1)),
        Err(FlagreelError::Validation(_))
    ));
    assert_eq!(std::fs::read(&out).unwrap(), b"keep");
}

#[test]
fn rejects_zero_delay() {
    let mut opts = GifSinkOpts::new("target/gif_sink/never.gif");
    opts.frame_delay_ms = 0;
    assert!(GifSink::new(opts).is_err());
}
