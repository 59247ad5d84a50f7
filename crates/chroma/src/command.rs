//! Argument parsing

use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: chroma <command> [args]

Commands:
  convert <color>                  Show a color as hex, rgba and hsla
  gradient <css>                   Parse and re-serialize a CSS gradient
  recent [list]                    List recently used colors
  recent add|remove <color>        Update the recent colors
  recent clear                     Forget all recent colors
  palettes [list]                  List palettes (* marks the active one)
  palettes export|css              Print palettes as JSON or CSS variables
  palettes import <file>           Import palettes from a JSON file
  presets [list]                   List built-in and saved gradient presets
  presets save <name> <css>        Save or overwrite a gradient preset
  presets delete <id>              Delete a saved gradient preset
  presets export                   Print saved presets as JSON
  presets import <file>            Import presets from a JSON file";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Convert(String),
    Gradient(String),
    Recent(RecentAction),
    Palettes(PaletteAction),
    Presets(PresetAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecentAction {
    List,
    Add(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteAction {
    List,
    Export,
    Css,
    Import(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresetAction {
    List,
    Save { name: String, css: String },
    Delete(String),
    Export,
    Import(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct UsageError(String);

impl Command {
    /// Parse arguments, program name excluded
    pub fn parse(args: &[String]) -> Result<Self, UsageError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            [] | ["help"] | ["-h"] | ["--help"] => Ok(Self::Help),
            ["convert", rest @ ..] => Ok(Self::Convert(joined(rest, "convert <color>")?)),
            ["gradient", rest @ ..] => Ok(Self::Gradient(joined(rest, "gradient <css>")?)),

            ["recent"] | ["recent", "list"] => Ok(Self::Recent(RecentAction::List)),
            ["recent", "add", color] => Ok(Self::Recent(RecentAction::Add(color.to_string()))),
            ["recent", "remove", color] => Ok(Self::Recent(RecentAction::Remove(color.to_string()))),
            ["recent", "clear"] => Ok(Self::Recent(RecentAction::Clear)),

            ["palettes"] | ["palettes", "list"] => Ok(Self::Palettes(PaletteAction::List)),
            ["palettes", "export"] => Ok(Self::Palettes(PaletteAction::Export)),
            ["palettes", "css"] => Ok(Self::Palettes(PaletteAction::Css)),
            ["palettes", "import", file] => Ok(Self::Palettes(PaletteAction::Import(PathBuf::from(*file)))),

            ["presets"] | ["presets", "list"] => Ok(Self::Presets(PresetAction::List)),
            ["presets", "save", name, rest @ ..] => Ok(Self::Presets(PresetAction::Save {
                name: name.to_string(),
                css: joined(rest, "presets save <name> <css>")?,
            })),
            ["presets", "delete", id] => Ok(Self::Presets(PresetAction::Delete(id.to_string()))),
            ["presets", "export"] => Ok(Self::Presets(PresetAction::Export)),
            ["presets", "import", file] => Ok(Self::Presets(PresetAction::Import(PathBuf::from(*file)))),

            [command, ..] => Err(UsageError(format!("Unrecognized arguments for '{}'", command))),
        }
    }
}

/// CSS values contain spaces; accept them quoted or split across arguments
fn joined(rest: &[&str], usage: &str) -> Result<String, UsageError> {
    let value = rest.join(" ");
    if value.trim().is_empty() {
        return Err(UsageError(format!("Usage: chroma {}", usage)));
    }
    Ok(value)
}
