use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Parameter;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` visually distinct colours on evenly spaced hues, starting at `hue_offset`.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, 0.50).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parameter → Color32
// ---------------------------------------------------------------------------

/// One fixed colour per parameter, so a parameter keeps its colour no matter
/// which others are selected.
#[derive(Debug, Clone)]
pub struct ParameterColors {
    colors: [Color32; Parameter::COUNT],
}

impl Default for ParameterColors {
    fn default() -> Self {
        // Start on blue so EC (the first chart) reads as "water".
        let palette = generate_palette(Parameter::COUNT, 200.0);
        let mut colors = [Color32::LIGHT_BLUE; Parameter::COUNT];
        for (slot, color) in colors.iter_mut().zip(palette) {
            *slot = color;
        }
        Self { colors }
    }
}

impl ParameterColors {
    pub fn color_for(&self, parameter: Parameter) -> Color32 {
        self.colors[parameter.index()]
    }
}
