//! Tests for arrow polygon geometry.

use arrows_common::ArrowStyle;
use renderer::arrow::{ArrowShape, Point};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================================================
// Shape sizing
// ============================================================================

#[test]
fn test_calm_wind_uses_minimum_sizes() {
    let style = ArrowStyle::default();
    let shape = ArrowShape::for_speed(0.0, &style);
    assert!(close(shape.length, style.length.min));
    assert!(close(shape.tail_width, style.tail_width.min));
    assert!(close(shape.head_width, style.head_width.min));
}

#[test]
fn test_strong_wind_saturates_sizes() {
    let style = ArrowStyle::default();
    let at_max = ArrowShape::for_speed(50.0, &style);
    let beyond = ArrowShape::for_speed(120.0, &style);
    assert_eq!(at_max, beyond);
    assert!(close(at_max.length, style.length.max));
    assert!(close(at_max.tail_width, style.tail_width.max));
    assert!(close(at_max.head_width, style.head_width.max));
}

#[test]
fn test_faster_wind_draws_bigger_arrow() {
    let style = ArrowStyle::default();
    let mut last = ArrowShape::for_speed(0.0, &style);
    for speed in (5..=50).step_by(5) {
        let shape = ArrowShape::for_speed(speed as f64, &style);
        assert!(shape.length > last.length, "length at {}", speed);
        assert!(shape.tail_width > last.tail_width, "tail at {}", speed);
        assert!(shape.head_width > last.head_width, "head at {}", speed);
        last = shape;
    }
}

#[test]
fn test_head_wider_than_tail() {
    let style = ArrowStyle::default();
    for speed in [0.0, 10.0, 25.0, 50.0] {
        let shape = ArrowShape::for_speed(speed, &style);
        assert!(shape.head_width > shape.tail_width);
        assert!(shape.head_length < shape.length);
    }
}

// ============================================================================
// Polygon orientation
// ============================================================================

#[test]
fn test_polygon_has_seven_points_pointing_down() {
    let shape = ArrowShape::for_speed(20.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let pts = shape.polygon(center);

    assert_eq!(pts.len(), 7);
    // Tip is the lowest point
    let tip = pts[4];
    assert!(pts.iter().all(|p| p.y <= tip.y));
    assert!(close(tip.y, center.y + shape.length / 2.0));
    // Tail starts at the top
    assert!(close(pts[0].y, center.y - shape.length / 2.0));
}

#[test]
fn test_north_wind_points_south() {
    let shape = ArrowShape::for_speed(20.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let tip = shape.rotated_polygon(center, 0.0)[4];
    assert!(close(tip.x, 10.0));
    assert!(tip.y > center.y);
}

#[test]
fn test_east_wind_points_west() {
    let shape = ArrowShape::for_speed(20.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let tip = shape.rotated_polygon(center, 90.0)[4];
    assert!(close(tip.y, 10.0));
    assert!(close(tip.x, center.x - shape.length / 2.0));
}

#[test]
fn test_south_wind_points_north() {
    let shape = ArrowShape::for_speed(20.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let tip = shape.rotated_polygon(center, 180.0)[4];
    assert!(close(tip.x, 10.0));
    assert!(tip.y < center.y);
}

#[test]
fn test_west_wind_points_east() {
    let shape = ArrowShape::for_speed(20.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let tip = shape.rotated_polygon(center, 270.0)[4];
    assert!(tip.x > center.x);
    assert!(close(tip.y, 10.0));
}

#[test]
fn test_full_turn_is_identity() {
    let shape = ArrowShape::for_speed(35.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let a = shape.rotated_polygon(center, 0.0);
    let b = shape.rotated_polygon(center, 360.0);
    for (p, q) in a.iter().zip(b.iter()) {
        assert!(close(p.x, q.x) && close(p.y, q.y));
    }
}

#[test]
fn test_rotation_preserves_distance_to_center() {
    let shape = ArrowShape::for_speed(15.0, &ArrowStyle::default());
    let center = Point::new(10.0, 10.0);
    let base = shape.polygon(center);
    let rotated = shape.rotated_polygon(center, 137.0);
    for (p, q) in base.iter().zip(rotated.iter()) {
        let d1 = (p.x - center.x).hypot(p.y - center.y);
        let d2 = (q.x - center.x).hypot(q.y - center.y);
        assert!(close(d1, d2));
    }
}
