//! Command line interface
//!
//! Builds a plan headlessly: load config and catalog, size the room, place
//! items, then write the export document.

use anyhow::{Context, Result};
use clap::Parser;
use kitchenplan_core::{constants::DEFAULT_EXPORT_FILE, parse_dimension};
use kitchenplan_layout::{Catalog, Planner};
use kitchenplan_settings::Config;
use std::path::{Path, PathBuf};

/// command line arguments for building and exporting a plan
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// config file (JSON or TOML); the platform config file is used when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON catalog of item templates; the built-in set is used otherwise
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// room width in millimeters
    #[arg(long)]
    pub width: Option<String>,

    /// room depth in millimeters
    #[arg(long)]
    pub depth: Option<String>,

    /// catalog id to place, may be repeated
    #[arg(long = "add", value_name = "ID")]
    pub add: Vec<String>,

    /// where to write the plan; a directory gets `plan.json`, stdout when absent
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn load_config(args: &CliArgs) -> Result<Config> {
    if let Some(path) = &args.config {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match Config::default_path() {
        Ok(path) if path.exists() => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        _ => Ok(Config::default()),
    }
}

fn load_catalog(args: &CliArgs) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

/// Build the planner described by `args`.
pub fn build_planner(args: &CliArgs) -> Result<Planner> {
    let config = load_config(args)?;
    let catalog = load_catalog(args)?;
    let mut planner = Planner::new(config, catalog);

    if args.width.is_some() || args.depth.is_some() {
        let room = *planner.model().room();
        let width = args
            .width
            .as_deref()
            .map_or(room.width_mm, parse_dimension);
        let depth = args
            .depth
            .as_deref()
            .map_or(room.depth_mm, parse_dimension);
        planner.resize_room(width, depth);
    }

    for id in &args.add {
        planner
            .add_from_catalog(id)
            .with_context(|| format!("Cannot place '{}'", id))?;
    }

    Ok(planner)
}

/// Resolve `--out`, placing the default file name inside a directory.
pub fn export_path(out: &Path) -> PathBuf {
    if out.is_dir() {
        out.join(DEFAULT_EXPORT_FILE)
    } else {
        out.to_path_buf()
    }
}

/// Build the plan and write it out.
pub fn run(args: &CliArgs) -> Result<()> {
    let planner = build_planner(args)?;
    let document = planner.export();

    match &args.out {
        Some(path) => document.save_to_file(export_path(path)),
        None => document.write_to(std::io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_add() {
        let args = CliArgs::parse_from([
            "kitchenplan",
            "--width",
            "2400",
            "--add",
            "sink-600",
            "--add",
            "base-400",
        ]);
        assert_eq!(args.width.as_deref(), Some("2400"));
        assert_eq!(args.add, vec!["sink-600", "base-400"]);
        assert!(args.out.is_none());
    }
}
