//! Tests for glyph assembly and rasterization.

use arrows_common::{ArrowStyle, Color};
use renderer::{ArrowRenderer, DeviceScale, RenderError};

#[test]
fn test_render_is_deterministic() {
    let renderer = ArrowRenderer::default();
    for angle in [0.0, 45.0, 90.0, 181.0, 359.0] {
        for speed in [0.0, 7.5, 20.0, 64.0] {
            let a = renderer.render(angle, speed, "12");
            let b = renderer.render(angle, speed, "12");
            assert_eq!(a, b);
            assert_eq!(renderer.to_svg(&a), renderer.to_svg(&b));
        }
    }
}

#[test]
fn test_glyph_carries_inputs() {
    let glyph = ArrowRenderer::default().render(90.0, 20.0, "20");
    assert_eq!(glyph.angle, 90.0);
    assert_eq!(glyph.speed_kmh, 20.0);
    assert_eq!(glyph.label, "20");
}

#[test]
fn test_svg_structure() {
    let renderer = ArrowRenderer::default();
    let glyph = renderer.render(275.0, 61.0, "33");
    let svg = renderer.to_svg(&glyph);

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 37 20""#));
    assert!(svg.contains("<title>275°</title>"));
    assert!(svg.contains(&format!(r#"fill="{}""#, glyph.fill.to_css())));
    assert!(svg.contains(r##"stroke="#404040""##));
    assert!(svg.contains(r#"paint-order="stroke""#));
    assert!(svg.contains(">33</text>"));

    let points = svg
        .split(r#"points=""#)
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    assert_eq!(points.split(' ').count(), 7);
}

#[test]
fn test_svg_label_shows_raw_speed() {
    // 10 kt is 18.52 km/h, but the label keeps the raw number
    let renderer = ArrowRenderer::default();
    let glyph = renderer.render(0.0, 18.52, "10");
    assert!(renderer.to_svg(&glyph).contains(">10</text>"));
}

#[test]
fn test_rasterize_size_follows_scale() {
    let renderer = ArrowRenderer::default();
    let glyph = renderer.render(0.0, 20.0, "20");

    let one = renderer.rasterize(&glyph, DeviceScale::ONE).unwrap();
    assert_eq!((one.width(), one.height()), (37, 20));

    let two = renderer.rasterize(&glyph, DeviceScale::new(2)).unwrap();
    assert_eq!((two.width(), two.height()), (74, 40));
}

#[test]
fn test_rasterized_arrow_uses_fill_color() {
    let renderer = ArrowRenderer::default();
    let glyph = renderer.render(0.0, 20.0, "20");
    let pixmap = renderer.rasterize(&glyph, DeviceScale::new(2)).unwrap();

    // Arrow box center lies inside the tail
    let center = pixmap.pixel(20, 20).unwrap();
    let (r, g, b, _) = glyph.fill.to_rgba();
    assert_eq!(center.alpha(), 255);
    assert!((center.red() as i32 - r as i32).abs() <= 2);
    assert!((center.green() as i32 - g as i32).abs() <= 2);
    assert!((center.blue() as i32 - b as i32).abs() <= 2);

    // Top-left corner is outside the arrow
    assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
}

#[test]
fn test_png_output_has_signature() {
    let renderer = ArrowRenderer::new(ArrowStyle::default()).unwrap();
    let glyph = renderer.render(180.0, 5.0, "5");
    let png = renderer.render_png(&glyph, DeviceScale::ONE).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

/// Pixels with any coverage right of the arrow box, where only the label
/// is drawn.
fn label_pixels(pixmap: &tiny_skia::Pixmap, scale: u32) -> usize {
    let mut count = 0;
    for y in 0..pixmap.height() {
        for x in (21 * scale)..pixmap.width() {
            if pixmap.pixel(x, y).map_or(false, |p| p.alpha() > 0) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_label_is_rasterized() {
    let renderer = ArrowRenderer::default();
    let glyph = renderer.render(0.0, 20.0, "88");

    let pixmap = renderer.rasterize(&glyph, DeviceScale::ONE).unwrap();
    assert!(label_pixels(&pixmap, 1) > 0);

    let pixmap = renderer.rasterize(&glyph, DeviceScale::new(2)).unwrap();
    assert!(label_pixels(&pixmap, 2) > 0);
}

#[test]
fn test_label_falls_back_from_missing_family() {
    let style = ArrowStyle {
        font_family: "No Such Family, sans-serif".to_string(),
        ..ArrowStyle::default()
    };
    let renderer = ArrowRenderer::new(style).unwrap();
    let glyph = renderer.render(90.0, 35.0, "35");
    let pixmap = renderer.rasterize(&glyph, DeviceScale::ONE).unwrap();
    assert!(label_pixels(&pixmap, 1) > 0);
}

#[test]
fn test_empty_label_leaves_label_area_clear() {
    let renderer = ArrowRenderer::default();
    let glyph = renderer.render(0.0, 20.0, "");
    let pixmap = renderer.rasterize(&glyph, DeviceScale::ONE).unwrap();
    assert_eq!(label_pixels(&pixmap, 1), 0);
}

#[test]
fn test_malformed_style_color_is_rejected() {
    let style = ArrowStyle {
        outline_color: Color::hex("#40404"),
        ..ArrowStyle::default()
    };
    assert!(matches!(ArrowRenderer::new(style), Err(RenderError::Style(_))));
}
