//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{expand_path, Settings};
use crate::domain::{aggregate, FamilyTree, Report, TreeBuilder, TreeNodeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Tree) => {
            let settings = Settings::load()?;
            output::header(&source_label(cli, &settings));
            output::info(&render_tree(cli, &settings)?);
            Ok(())
        }
        Some(Commands::Count) | None => {
            let settings = Settings::load()?;
            output::info(&render_count(cli, &settings)?);
            Ok(())
        }
    }
}

/// Aggregated report lines for the selected family.
#[instrument(level = "debug", skip(cli))]
pub fn render_count(cli: &Cli, settings: &Settings) -> CliResult<String> {
    let tree = load_aggregated(cli, settings)?;
    Ok(Report::from_tree(&tree, &settings.total_label).to_string())
}

/// Aggregated family rendered as an ascii tree.
#[instrument(level = "debug", skip(cli))]
pub fn render_tree(cli: &Cli, settings: &Settings) -> CliResult<String> {
    let tree = load_aggregated(cli, settings)?;
    Ok(tree.to_display_tree().to_string())
}

fn load_aggregated(cli: &Cli, settings: &Settings) -> CliResult<FamilyTree> {
    let mut tree = load_tree(cli, settings)?;
    let total = aggregate(&mut tree)?;
    info!(total, members = tree.len(), "aggregated family");
    Ok(tree)
}

/// `--file` wins over the configured tree file; without either, the built-in family.
fn load_tree(cli: &Cli, settings: &Settings) -> CliResult<FamilyTree> {
    let path = cli
        .file
        .as_deref()
        .map(expand_path)
        .or_else(|| settings.tree_file.clone());

    match path {
        Some(path) => {
            debug!("loading tree from {}", path.display());
            Ok(TreeBuilder::new().build_from_file(&path)?)
        }
        None => Ok(FamilyTree::fixture()),
    }
}

fn source_label(cli: &Cli, settings: &Settings) -> String {
    cli.file
        .as_ref()
        .or(settings.tree_file.as_ref())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in family".to_string())
}
