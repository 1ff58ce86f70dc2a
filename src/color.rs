use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: party name → Color32
// ---------------------------------------------------------------------------

/// Maps each party in the corpus to a stable, distinct colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted set of party names.
    pub fn new(parties: &BTreeSet<String>) -> Self {
        let palette = generate_palette(parties.len());
        let mapping: BTreeMap<String, Color32> = parties
            .iter()
            .zip(palette)
            .map(|(p, c)| (p.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a party.
    pub fn color_for(&self, party: &str) -> Color32 {
        self.mapping
            .get(party)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_party_gets_default() {
        let parties: BTreeSet<String> = ["INC".to_string(), "BJP".to_string()].into();
        let map = ColorMap::new(&parties);
        assert_ne!(map.color_for("INC"), map.color_for("BJP"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
