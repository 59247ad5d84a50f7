//! Seeded default palettes

use crate::ColorPalette;

const MATERIAL: &[&str] = &[
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4", "#00BCD4",
    "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800", "#FF5722",
];

const PASTEL: &[&str] = &[
    "#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF", "#E0BBE4", "#FEC8D8", "#D4F0F0",
];

const EARTH_TONES: &[&str] = &[
    "#8B4513", "#A0522D", "#CD853F", "#DEB887", "#556B2F", "#6B8E23", "#808000", "#BDB76B",
];

const GRAYSCALE: &[&str] = &[
    "#000000", "#212121", "#424242", "#616161", "#757575", "#9E9E9E", "#BDBDBD", "#E0E0E0",
    "#F5F5F5", "#FFFFFF",
];

fn builtin(id: &str, name: &str, description: &str, colors: &[&str]) -> ColorPalette {
    ColorPalette {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        colors: colors.iter().map(|c| c.to_string()).collect(),
        is_default: true,
        created_at: 0,
        updated_at: 0,
    }
}

/// The read-only palettes every store starts with
pub fn default_palettes() -> Vec<ColorPalette> {
    vec![
        builtin("default-material", "Material", "Material Design primary colors", MATERIAL),
        builtin("default-pastel", "Pastel", "Soft pastel tones", PASTEL),
        builtin("default-earth-tones", "Earth Tones", "Browns and olives", EARTH_TONES),
        builtin("default-grayscale", "Grayscale", "Black to white", GRAYSCALE),
    ]
}
