use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// The ten-colour categorical cycle charts conventionally start from.
const TAB10: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

/// Colours for columns with more levels than tab10 holds, where repeating
/// the cycle would give two bars of one panel the same colour.
///
/// Hues are evenly spaced, starting at tab10's blue.
pub fn spaced_hues(n: usize) -> Vec<Color32> {
    const START_HUE: f32 = 205.0;
    (0..n)
        .map(|i| {
            let hue = (START_HUE + 360.0 * i as f32 / n as f32) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// `n` colours for categorical series: the tab10 cycle while it lasts,
/// evenly spaced hues beyond that.
pub fn series_palette(n: usize) -> Vec<Color32> {
    if n <= TAB10.len() {
        TAB10[..n]
            .iter()
            .map(|&(r, g, b)| Color32::from_rgb(r, g, b))
            .collect()
    } else {
        spaced_hues(n)
    }
}

/// Colour of single-series bars.
pub fn primary() -> Color32 {
    let (r, g, b) = TAB10[0];
    Color32::from_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Color mapping: level → Color32
// ---------------------------------------------------------------------------

/// Pairs each level of a hue column with its series colour.
pub fn level_colors(levels: &[Category]) -> Vec<(Category, Color32)> {
    levels
        .iter()
        .cloned()
        .zip(series_palette(levels.len()))
        .collect()
}
