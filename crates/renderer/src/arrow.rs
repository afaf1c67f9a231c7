//! Arrow polygon geometry.
//!
//! The arrow is a rectangular tail tapering into a triangular head, built
//! pointing down (wind from north blows south) and then rotated clockwise
//! about the arrow box center by the meteorological wind angle.

use arrows_common::ArrowStyle;

/// A 2D point in logical pixels, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate clockwise (on screen) about `center` by `angle_deg`.
    pub fn rotate_about(self, center: Point, angle_deg: f64) -> Point {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }
}

/// Speed-derived arrow dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShape {
    pub length: f64,
    pub tail_width: f64,
    pub head_width: f64,
    pub head_length: f64,
}

impl ArrowShape {
    /// Derive the arrow dimensions for a canonical speed in km/h.
    pub fn for_speed(speed_kmh: f64, style: &ArrowStyle) -> Self {
        let length = style.length.mapper().map(speed_kmh);
        let tail_width = style.tail_width.mapper().map(speed_kmh);
        let head_width = style.head_width.mapper().map(speed_kmh);
        let head_length =
            (head_width * style.head_length_ratio).min(length * style.head_length_max_fraction);

        Self {
            length,
            tail_width,
            head_width,
            head_length,
        }
    }

    /// The closed 7-point outline pointing down, centered on `center`.
    ///
    /// Order: tail top-left, tail top-right, shoulder right, head right,
    /// tip, head left, shoulder left.
    pub fn polygon(&self, center: Point) -> [Point; 7] {
        let top = center.y - self.length / 2.0;
        let tip = center.y + self.length / 2.0;
        let neck = tip - self.head_length;
        let half_tail = self.tail_width / 2.0;
        let half_head = self.head_width / 2.0;

        [
            Point::new(center.x - half_tail, top),
            Point::new(center.x + half_tail, top),
            Point::new(center.x + half_tail, neck),
            Point::new(center.x + half_head, neck),
            Point::new(center.x, tip),
            Point::new(center.x - half_head, neck),
            Point::new(center.x - half_tail, neck),
        ]
    }

    /// The outline rotated to `angle_deg` about `center`.
    pub fn rotated_polygon(&self, center: Point, angle_deg: f64) -> [Point; 7] {
        self.polygon(center).map(|p| p.rotate_about(center, angle_deg))
    }
}
