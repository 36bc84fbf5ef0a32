use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::MAX_FILES;

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Colour for a file slot, from evenly spaced hues.
///
/// Slots keep their hue when other files are removed.
pub fn slot_color(slot: usize) -> Color32 {
    // Offset so the first slot starts at blue rather than red.
    let hue = 210.0 + (slot % MAX_FILES) as f32 / MAX_FILES as f32 * 360.0;
    hue_color(hue % 360.0)
}

fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
