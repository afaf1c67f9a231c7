//! Wind speed color mapping.
//!
//! Speed is first mapped to a percent position with the style's color curve,
//! then looked up on the color stops by linear interpolation between the two
//! bounding stops.

use arrows_common::{ArrowStyle, Color};

/// Percent position (0-100) on the color ramp for a speed in km/h.
pub fn speed_percent(speed_kmh: f64, style: &ArrowStyle) -> f64 {
    style.color_mapper().map(speed_kmh)
}

/// Fill color for a speed in km/h.
pub fn wind_speed_color(speed_kmh: f64, style: &ArrowStyle) -> Color {
    style.color_stops.color_at(speed_percent(speed_kmh, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_is_first_stop() {
        let style = ArrowStyle::default();
        assert_eq!(
            wind_speed_color(0.0, &style).to_rgba(),
            style.color_stops.stops[0].color.to_rgba()
        );
    }

    #[test]
    fn test_saturates_at_max() {
        let style = ArrowStyle::default();
        let last = style.color_stops.stops.last().unwrap().color.to_rgba();
        assert_eq!(wind_speed_color(style.color_max_kmh, &style).to_rgba(), last);
        assert_eq!(wind_speed_color(500.0, &style).to_rgba(), last);
    }

    #[test]
    fn test_percent_is_clamped() {
        let style = ArrowStyle::default();
        assert_eq!(speed_percent(-3.0, &style), 0.0);
        assert_eq!(speed_percent(1000.0, &style), 100.0);
    }
}
