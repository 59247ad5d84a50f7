//! Built-in presets. Static; never written to storage.

use once_cell::sync::Lazy;

use crate::{GradientPreset, PresetCategory};

static BUILTIN_PRESETS: Lazy<Vec<GradientPreset>> = Lazy::new(|| {
    use PresetCategory::*;

    [
        (Material, "Blue Ocean", "linear-gradient(90deg, #2196F3 0%, #0D47A1 100%)"),
        (Material, "Sunset Orange", "linear-gradient(135deg, #FF9800 0%, #F44336 100%)"),
        (Material, "Purple Haze", "linear-gradient(45deg, #9C27B0 0%, #673AB7 100%)"),
        (Nature, "Forest", "linear-gradient(180deg, #2E7D32 0%, #A5D6A7 100%)"),
        (Nature, "Clear Sky", "linear-gradient(180deg, #81D4FA 0%, #E1F5FE 100%)"),
        (Nature, "Desert Sun", "radial-gradient(circle at center, #FFEB3B 0%, #FF9800 60%, #BF360C 100%)"),
        (Tech, "Neon", "linear-gradient(90deg, #00E5FF 0%, #D500F9 100%)"),
        (Tech, "Terminal", "linear-gradient(180deg, #000000 0%, #00C853 100%)"),
        (Tech, "Cyber Glow", "radial-gradient(ellipse at center, #18FFFF 0%, #0D47A1 100%)"),
        (Monochrome, "Dark Fade", "linear-gradient(180deg, #212121 0%, #000000 100%)"),
        (Monochrome, "Silver", "linear-gradient(90deg, #E0E0E0 0%, #9E9E9E 100%)"),
        (Monochrome, "Spotlight", "radial-gradient(circle at center, #FFFFFF 0%, #BDBDBD 100%)"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (category, name, css))| GradientPreset {
        id: format!("builtin-{}-{}", category.as_str().to_lowercase(), i + 1),
        name: name.to_string(),
        css: css.to_string(),
        category,
        description: None,
        created_at: None,
    })
    .collect()
});

pub fn builtin_presets() -> &'static [GradientPreset] {
    &BUILTIN_PRESETS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use gradient::gradient_to_css;

    #[test]
    fn test_builtins_roundtrip() {
        for preset in builtin_presets() {
            assert_eq!(gradient_to_css(&preset.definition()), preset.css, "{}", preset.name);
        }
    }

    #[test]
    fn test_builtins_never_custom() {
        assert_eq!(builtin_presets().len(), 12);
        assert!(builtin_presets().iter().all(|p| p.category != PresetCategory::Custom));

        let ids: HashSet<&str> = builtin_presets().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 12);
    }
}
