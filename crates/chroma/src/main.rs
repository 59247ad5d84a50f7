//! Chroma - command-line front end
//!
//! Color conversion and gradient parsing run statelessly; recent colors,
//! palettes and presets are read from and written to the file-backed
//! store in the configured data directory.

mod command;

use std::path::Path;
use std::sync::Arc;
use anyhow::{bail, Result};

use chroma_core::{ChromaConfig, FileStore, KeyValueStore, PathFileAccess};
use gradient_presets::GradientPresetStore;
use palette::PaletteStore;
use recent_colors::RecentColors;

use command::{Command, PaletteAction, PresetAction, RecentAction, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ChromaConfig::load_or_default()?;
    chroma_core::logging::init(config.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let directory = config.storage_directory();
    tracing::debug!("Using storage directory {:?}", directory);
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(directory));

    match command {
        Command::Help => println!("{}", USAGE),
        Command::Convert(text) => show_color(&text)?,
        Command::Gradient(text) => show_gradient(&text),
        Command::Recent(action) => recent(action, RecentColors::from_config(store, &config.recent_colors)),
        Command::Palettes(action) => {
            palettes(action, PaletteStore::from_config(store, &config.palettes)).await?
        }
        Command::Presets(action) => {
            presets(action, GradientPresetStore::from_config(store, &config.presets)).await?
        }
    }

    Ok(())
}

fn show_color(text: &str) -> Result<()> {
    let Some(rgba) = color::parse_color(text) else {
        bail!("Not a color: {}", text);
    };

    println!("hex   {}", color::rgba_to_hex(&rgba));
    println!("rgba  {}", color::format_rgba(&rgba));
    println!("hsla  {}", color::format_hsla(&color::rgba_to_hsla(&rgba)));
    Ok(())
}

fn show_gradient(text: &str) {
    if !gradient::is_gradient_string(text) {
        tracing::warn!("Input is not a gradient, showing the default");
    }

    let def = gradient::parse_gradient(text);
    println!("{}", gradient::gradient_to_css(&def));
    for stop in &def.stops {
        println!("  {:<8} {:>5}%  {}", stop.id, stop.position, stop.color);
    }
}

fn recent(action: RecentAction, mut history: RecentColors) {
    match action {
        RecentAction::List => {}
        RecentAction::Add(color) => history.add(&color),
        RecentAction::Remove(color) => history.remove(&color),
        RecentAction::Clear => history.clear(),
    }

    for color in history.colors() {
        println!("{}", color);
    }
}

async fn palettes(action: PaletteAction, mut store: PaletteStore) -> Result<()> {
    match action {
        PaletteAction::List => {
            for palette in store.palettes() {
                let marker = if store.active_palette_id() == Some(palette.id.as_str()) { "*" } else { " " };
                println!("{} {} ({}) {}", marker, palette.name, palette.id, palette.colors.join(" "));
            }
        }
        PaletteAction::Export => println!("{}", store.export_palettes()),
        PaletteAction::Css => println!("{}", store.export_css_variables()),
        PaletteAction::Import(path) => {
            if let Some(result) = store.import_from(&reader(&path)?).await? {
                println!("Imported {} palettes", result.added);
                for error in result.errors {
                    eprintln!("  {}", error);
                }
            }
        }
    }
    Ok(())
}

async fn presets(action: PresetAction, mut store: GradientPresetStore) -> Result<()> {
    if let Some(error) = store.error() {
        eprintln!("{}", error);
    }

    match action {
        PresetAction::List => {
            for preset in store.all_presets() {
                println!("{:<10} {:<28} {}", preset.category.as_str(), preset.name, preset.id);
            }
        }
        PresetAction::Save { name, css } => {
            let saved = store.save_preset(&name, &css)?;
            println!("Saved {} ({})", saved.name, saved.id);
        }
        PresetAction::Delete(id) => {
            if !store.delete_preset(&id) {
                bail!("No saved preset with id {}", id);
            }
        }
        PresetAction::Export => println!("{}", store.export_json()),
        PresetAction::Import(path) => {
            if let Some(result) = store.import_from(&reader(&path)?).await? {
                println!("Imported {} presets", result.added);
                for error in result.errors {
                    eprintln!("  {}", error);
                }
            }
        }
    }
    Ok(())
}

fn reader(path: &Path) -> Result<PathFileAccess> {
    if !path.is_file() {
        bail!("No such file: {}", path.display());
    }
    Ok(PathFileAccess::reading(path))
}
