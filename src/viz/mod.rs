//! Debug rendering of matched feature points.
//!
//! Purely a side effect on the canvas; nothing here feeds back into the
//! detection output.

use crate::engine::MultiModalTemplate;
use crate::frame::ColorImage;

/// Marker colors per modality index, as RGB triples.
pub const MODALITY_COLORS: [[u8; 3]; 5] = [
    [0, 0, 255],
    [0, 255, 0],
    [255, 255, 0],
    [255, 140, 0],
    [255, 0, 0],
];

/// Draws every feature point of `template` onto `canvas`, offset by the
/// match position.
///
/// Each modality gets a fixed color picked solely by its index (the palette
/// wraps past five modalities) and an outline circle of radius `t / 2` per
/// feature. Markers falling outside the canvas are clipped.
pub fn draw_matched_features(
    template: &MultiModalTemplate,
    modality_count: usize,
    canvas: &mut ColorImage,
    offset: (i32, i32),
    t: i32,
) {
    for m in 0..modality_count {
        let Some(modality) = template.modalities.get(m) else {
            continue;
        };
        let color = MODALITY_COLORS[m % MODALITY_COLORS.len()];
        for feature in &modality.features {
            draw_circle(canvas, feature.x + offset.0, feature.y + offset.1, t / 2, color);
        }
    }
}

/// Midpoint circle outline, clipped at the canvas borders.
fn draw_circle(canvas: &mut ColorImage, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    if radius <= 0 {
        canvas.put_pixel(cx, cy, color);
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ] {
            canvas.put_pixel(px, py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
