//! Default command: annotate or relocate every in-scope file

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::parse_csv;
use crate::annotate::{Annotator, Relocator};
use crate::classify::Ecosystem;
use crate::config::{
    load_config_with_source, merge_cli_with_config, select_ecosystem, CliOverrides,
};
use crate::domain::{AnnotateOutcome, Config, OutputFormat, RelocateOutcome, RunMode, RunSummary};
use crate::rules::IgnoreRuleSet;
use crate::scan::{TreeWalker, Walk};

#[derive(Args)]
pub struct StampArgs {
    /// Directory to process (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Show which files would be modified without changing them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Copy files with path comments to the staging folder
    #[arg(short = 'r', long)]
    pub run: bool,

    /// Process only Node.js files (.js, .ts, .jsx, .mjs, .cjs)
    #[arg(short = 'n', long)]
    pub node: bool,

    /// Process only Go files (.go, go.mod, go.sum)
    #[arg(short = 'g', long)]
    pub go: bool,

    /// Process only Python files (.py)
    #[arg(short = 'p', long)]
    pub python: bool,

    /// Process only files of this ecosystem
    #[arg(long, value_enum, value_name = "ECOSYSTEM")]
    pub ecosystem: Option<Ecosystem>,

    /// Config file (defaults to bigbrain.toml / bigbrain.yml in PATH)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra ignore patterns (comma-separated, gitignore syntax)
    #[arg(short = 'i', long, value_name = "PATTERNS")]
    pub ignore: Option<String>,

    /// Ignore file relative to PATH [default: .gitignore]
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Staging folder relative to PATH used by --run [default: .bb]
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Follow symbolic links when walking
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Output format for per-file lines and the final summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: StampArgs) -> Result<()> {
    let flags = [
        (args.node, Ecosystem::Node),
        (args.go, Ecosystem::Go),
        (args.python, Ecosystem::Python),
    ];
    let requested = flags
        .into_iter()
        .filter_map(|(on, eco)| on.then_some(eco))
        .chain(args.ecosystem);
    let ecosystem = select_ecosystem(requested)?;

    let root = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("Error during processing: cannot access {}", root.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let (file_config, config_source) = load_config_with_source(&root, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            ecosystem,
            ignore_file: args.ignore_file.clone(),
            staging_dir: args.staging_dir.clone(),
            extra_ignore: parse_csv(&args.ignore).unwrap_or_default(),
            follow_symlinks: args.follow_symlinks,
        },
    );

    let mode = if args.run { RunMode::Relocate } else { RunMode::Annotate };
    let rules = build_rules(&root, &config, config_source.as_deref(), mode);
    tracing::debug!(
        "Scanning {} ({} ignore rules, ecosystem: {})",
        root.display(),
        rules.len(),
        config.ecosystem.map_or("any", Ecosystem::name)
    );

    let mut summary = RunSummary::new(mode, config.ecosystem, args.dry_run);
    let walker = TreeWalker::new(&root, &rules).follow_symlinks(config.follow_symlinks);
    let mut walk = walker.walk();
    let format = args.format;

    match mode {
        RunMode::Annotate => {
            let annotator = Annotator::new(&root, config.ecosystem);
            for_each_file(&mut walk, &mut summary, |path, summary| {
                let outcome = annotator.process_file(path, args.dry_run)?;
                report_annotate(format, &outcome);
                summary.record_annotate(&outcome);
                Ok(())
            })?;
        }
        RunMode::Relocate => {
            let relocator = Relocator::new(&root, &config.staging_dir);
            if !args.dry_run {
                relocator.ensure_staging_dir()?;
                tracing::info!("Created staging directory: {}", relocator.staging_dir().display());
            }
            for_each_file(&mut walk, &mut summary, |path, summary| {
                let outcome = relocator.process_file(path, args.dry_run)?;
                report_relocate(format, path, &outcome);
                summary.record_relocate(&outcome);
                Ok(())
            })?;
        }
    }

    summary.walk = walk.stats().clone();
    match format {
        OutputFormat::Text => println!("{}", summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if summary.failed > 0 {
        anyhow::bail!("{} file(s) could not be processed", summary.failed);
    }
    Ok(())
}

fn build_rules(
    root: &Path,
    config: &Config,
    config_source: Option<&Path>,
    mode: RunMode,
) -> IgnoreRuleSet {
    let mut rules = IgnoreRuleSet::new(config.ecosystem);

    let ignore_path = root.join(&config.ignore_file);
    if let Err(e) = rules.load(&ignore_path) {
        tracing::warn!("Could not load ignore file: {}", e);
    }
    for pattern in &config.extra_ignore {
        rules.add_pattern(pattern);
    }

    // The tool's own inputs are never stamped or staged.
    if let Some(source) = config_source {
        rules.add_root_path(root, source, false);
    }
    rules.add_root_path(root, &config.ignore_file, false);

    // Never walk into the staging folder, even when it is not hidden.
    if mode == RunMode::Relocate {
        rules.add_root_path(root, &config.staging_dir, true);
    }
    rules
}

/// Drive the walk, stopping on traversal errors and logging per-file ones.
fn for_each_file<F>(walk: &mut Walk<'_>, summary: &mut RunSummary, mut handle: F) -> Result<()>
where
    F: FnMut(&Path, &mut RunSummary) -> Result<()>,
{
    for item in walk.by_ref() {
        let path = item.context("Error during processing")?;
        if let Err(e) = handle(&path, summary) {
            tracing::error!("Error processing {}: {:#}", path.display(), e);
            summary.record_failure();
        }
    }
    Ok(())
}

fn report(format: OutputFormat, line: String) {
    match format {
        OutputFormat::Text => println!("{}", line),
        OutputFormat::Json => tracing::info!("{}", line),
    }
}

fn report_annotate(format: OutputFormat, outcome: &AnnotateOutcome) {
    match outcome {
        AnnotateOutcome::WouldInsert { relative_path } => {
            report(format, format!("Would insert path: {}", relative_path))
        }
        AnnotateOutcome::Inserted { relative_path } => {
            report(format, format!("Path inserted: {}", relative_path))
        }
        AnnotateOutcome::AlreadyPresent | AnnotateOutcome::Protected => {}
    }
}

fn report_relocate(format: OutputFormat, source: &Path, outcome: &RelocateOutcome) {
    match outcome {
        RelocateOutcome::WouldCopy { destination } => report(
            format,
            format!("Would copy {} to {}", source.display(), destination.display()),
        ),
        RelocateOutcome::Copied { destination } => {
            report(format, format!("Copied {} to {}", source.display(), destination.display()))
        }
        RelocateOutcome::Empty | RelocateOutcome::NoComment | RelocateOutcome::AlreadyStaged => {}
    }
}
