use super::*;
use kurbo::Shape as _;

#[test]
fn hexagon_has_six_vertices_on_the_radius() {
    let Outline::Polygon(points) = Outline::hexagon(Point::new(10.0, 10.0), 5.0) else {
        panic!("expected polygon");
    };
    assert_eq!(points.len(), 6);
    for p in &points {
        assert!((p.distance(Point::new(10.0, 10.0)) - 5.0).abs() < 1e-9);
    }
    assert!((points[0].x - 15.0).abs() < 1e-9);
}

#[test]
fn wedge_path_starts_at_center_and_closes() {
    let outline = Outline::wedge(Point::new(0.0, 0.0), 10.0, 0.0, std::f64::consts::FRAC_PI_2);
    let path = outline.to_bez_path();
    let els = path.elements();
    assert_eq!(els.first(), Some(&kurbo::PathEl::MoveTo(Point::new(0.0, 0.0))));
    assert_eq!(els.last(), Some(&kurbo::PathEl::ClosePath));
    let bbox = path.bounding_box();
    assert!(bbox.x1 <= 10.0 + 1e-6 && bbox.y1 <= 10.0 + 1e-6);
    assert!(bbox.x0 >= -1e-6 && bbox.y0 >= -1e-6);
}

#[test]
fn scaled_circle_moves_and_grows() {
    let c = Outline::Circle {
        center: Point::new(1.0, 2.0),
        radius: 3.0,
    };
    let s = c.scaled(2.0, kurbo::Vec2::new(10.0, 0.0));
    assert_eq!(
        s,
        Outline::Circle {
            center: Point::new(12.0, 4.0),
            radius: 6.0
        }
    );
}

#[test]
fn empty_polygon_is_empty_path() {
    assert!(Outline::Polygon(Vec::new()).to_bez_path().elements().is_empty());
}
