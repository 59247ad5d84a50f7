//! JSON import/export and CSS custom-property export

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::normalize_palette_color;
use crate::ColorPalette;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Palette as it appears in JSON exports: no id, no timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteExport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub colors: Vec<String>,
    pub is_default: bool,
}

impl From<&ColorPalette> for PaletteExport {
    fn from(palette: &ColorPalette) -> Self {
        Self {
            name: palette.name.clone(),
            description: palette.description.clone(),
            colors: palette.colors.clone(),
            is_default: palette.is_default,
        }
    }
}

/// Outcome of an import: how many palettes were added, and why others were not
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub added: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("{0}")]
    Json(String),
    #[error("Expected a JSON array of palettes")]
    NotAnArray,
    #[error("Palette at index {0} is missing a name")]
    MissingName(usize),
    #[error("Palette at index {0} must have a colors array")]
    MissingColors(usize),
}

/// An import entry that passed validation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImportedPalette {
    pub name: String,
    pub description: Option<String>,
    pub colors: Vec<String>,
}

/// Validate an exported JSON array.
///
/// Invalid entries are reported per index and skipped; invalid colors are
/// dropped silently and the rest capped at `max_colors`.
pub(crate) fn parse_import(json: &str, max_colors: usize) -> (Vec<ImportedPalette>, Vec<ImportError>) {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => return (Vec::new(), vec![ImportError::Json(e.to_string())]),
    };

    let Some(items) = value.as_array() else {
        return (Vec::new(), vec![ImportError::NotAnArray]);
    };

    let mut palettes = Vec::new();
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let Some(name) = name else {
            errors.push(ImportError::MissingName(index));
            continue;
        };

        let Some(raw_colors) = item.get("colors").and_then(Value::as_array) else {
            errors.push(ImportError::MissingColors(index));
            continue;
        };

        let mut colors: Vec<String> = Vec::new();
        for color in raw_colors.iter().filter_map(Value::as_str).filter_map(normalize_palette_color) {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors.truncate(max_colors);

        palettes.push(ImportedPalette {
            name: name.to_string(),
            description: item.get("description").and_then(Value::as_str).map(str::to_string),
            colors,
        });
    }

    (palettes, errors)
}

/// Pretty JSON array of [`PaletteExport`]
pub(crate) fn export_json(palettes: &[ColorPalette]) -> String {
    let exported: Vec<PaletteExport> = palettes.iter().map(PaletteExport::from).collect();
    serde_json::to_string_pretty(&exported).unwrap_or_else(|_| "[]".to_string())
}

/// One `:root` block with `--palette-<slug>-<n>` per color
pub(crate) fn css_variables(palettes: &[ColorPalette]) -> String {
    let mut css = String::from(":root {\n");
    for palette in palettes {
        let slug = slugify(&palette.name);
        for (i, color) in palette.colors.iter().enumerate() {
            css.push_str(&format!("  --palette-{}-{}: {};\n", slug, i + 1, color));
        }
    }
    css.push('}');
    css
}

/// Lowercase, collapse non-alphanumeric runs to `-`, trim hyphens
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = NON_ALNUM.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "palette".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(name: &str, colors: &[&str]) -> ColorPalette {
        ColorPalette {
            id: format!("id-{}", name),
            name: name.to_string(),
            description: None,
            colors: colors.iter().map(|c| c.to_string()).collect(),
            is_default: false,
            created_at: 1,
            updated_at: 2,
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Earth Tones"), "earth-tones");
        assert_eq!(slugify("  My  Palette!! v2 "), "my-palette-v2");
        assert_eq!(slugify("--Brand--"), "brand");
        assert_eq!(slugify("!!!"), "palette");
    }

    #[test]
    fn test_css_variables() {
        let css = css_variables(&[
            palette("Brand Colors", &["#FF0000", "#00FF00"]),
            palette("Accents", &["var(--x)"]),
        ]);
        assert_eq!(
            css,
            ":root {\n  --palette-brand-colors-1: #FF0000;\n  --palette-brand-colors-2: #00FF00;\n  --palette-accents-1: var(--x);\n}"
        );
    }

    #[test]
    fn test_export_omits_identity() {
        let json = export_json(&[palette("P", &["#112233"])]);
        let value: Value = serde_json::from_str(&json).unwrap();
        let entry = &value[0];
        assert_eq!(entry["name"], "P");
        assert_eq!(entry["isDefault"], false);
        assert!(entry.get("id").is_none());
        assert!(entry.get("createdAt").is_none());
    }

    #[test]
    fn test_parse_import_drops_invalid_colors() {
        let (palettes, errors) =
            parse_import(r##"[{"name":"P","colors":["#112233","not-a-color"]}]"##, 20);
        assert!(errors.is_empty());
        assert_eq!(palettes.len(), 1);
        assert_eq!(palettes[0].colors, vec!["#112233"]);
    }

    #[test]
    fn test_parse_import_per_index_errors() {
        let (palettes, errors) = parse_import(
            r##"[{"colors":[]},{"name":"ok","colors":["#fff"]},{"name":"bad","colors":"#fff"}]"##,
            20,
        );
        assert_eq!(palettes.len(), 1);
        assert_eq!(errors, vec![ImportError::MissingName(0), ImportError::MissingColors(2)]);
        assert_eq!(errors[0].to_string(), "Palette at index 0 is missing a name");
    }

    #[test]
    fn test_parse_import_caps_and_dedups() {
        let colors: Vec<String> = (0..30).map(|i| format!("\"#0000{:02x}\"", i)).collect();
        let json = format!(r##"[{{"name":"Big","colors":[{},"#000000"]}}]"##, colors.join(","));
        let (palettes, _) = parse_import(&json, 20);
        assert_eq!(palettes[0].colors.len(), 20);
    }

    #[test]
    fn test_parse_import_top_level_failures() {
        let (palettes, errors) = parse_import("{oops", 20);
        assert!(palettes.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ImportError::Json(_)));

        let (_, errors) = parse_import(r#"{"name":"P"}"#, 20);
        assert_eq!(errors, vec![ImportError::NotAnArray]);
    }
}
