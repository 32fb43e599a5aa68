use kurbo::{Affine, BezPath, Point, Shape as _};

/// Tolerance used when flattening curves into Bézier paths.
pub const PATH_TOLERANCE: f64 = 0.05;

/// A closed shape that can be filled or stroked on a surface or written into a vector document.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// Circle around `center`.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Closed polygon through `points`.
    Polygon(Vec<Point>),
    /// Arbitrary closed path.
    Path(BezPath),
}

impl Outline {
    /// Regular hexagon with a vertex at angle 0 (pointing right).
    pub fn hexagon(center: Point, radius: f64) -> Self {
        let points = (0..6)
            .map(|i| {
                let angle = std::f64::consts::FRAC_PI_3 * f64::from(i);
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Self::Polygon(points)
    }

    /// Pie wedge from `center` spanning `sweep` radians from `start`.
    pub fn wedge(center: Point, radius: f64, start: f64, sweep: f64) -> Self {
        let arc = kurbo::Arc {
            center,
            radii: kurbo::Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let mut path = BezPath::new();
        path.move_to(center);
        path.line_to(Point::new(
            center.x + radius * start.cos(),
            center.y + radius * start.sin(),
        ));
        path.extend(arc.append_iter(PATH_TOLERANCE));
        path.close_path();
        Self::Path(path)
    }

    /// Bézier path of the outline.
    pub fn to_bez_path(&self) -> BezPath {
        match self {
            Self::Circle { center, radius } => {
                kurbo::Circle::new(*center, *radius).to_path(PATH_TOLERANCE)
            }
            Self::Polygon(points) => {
                let mut path = BezPath::new();
                let mut it = points.iter();
                if let Some(&first) = it.next() {
                    path.move_to(first);
                    for &p in it {
                        path.line_to(p);
                    }
                    path.close_path();
                }
                path
            }
            Self::Path(path) => path.clone(),
        }
    }

    /// Apply a uniform scale about the origin followed by a translation.
    pub fn scaled(&self, scale: f64, offset: kurbo::Vec2) -> Self {
        let xf = Affine::translate(offset) * Affine::scale(scale);
        match self {
            Self::Circle { center, radius } => Self::Circle {
                center: xf * *center,
                radius: radius * scale,
            },
            Self::Polygon(points) => Self::Polygon(points.iter().map(|p| xf * *p).collect()),
            Self::Path(path) => Self::Path(xf * path.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/outline.rs"]
mod tests;
