use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use colored::Colorize;
use tkd_merge::merge_data;
use tkd_report::ReportView;
use tkd_store::{
    default_platform_key, import_artifacts, read_json, read_snapshot, record_snapshot, write_json,
    DirectorySource, RecordOptions, RecordOutcome, SnapshotSource, WorkspaceConfig,
};
use tkd_types::{MergedReport, ReportStats};

use crate::cli::*;

/// Settings shared by every command.
pub struct Context {
    pub config: WorkspaceConfig,
    pub format: OutputFormat,
}

impl Context {
    fn text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = WorkspaceConfig::load_or_default(cli.config.as_deref())?;
    let ctx = Context {
        config,
        format: cli.format,
    };
    match cli.command {
        Command::Merge(args) => cmd_merge(&ctx, args),
        Command::Summarize(args) => cmd_summarize(&ctx, args),
        Command::Record(args) => cmd_record(&ctx, args),
        Command::Import(args) => cmd_import(&ctx, args),
    }
}

fn cmd_merge(ctx: &Context, args: MergeArgs) -> anyhow::Result<()> {
    let input = args.input.unwrap_or_else(|| ctx.config.snapshots_dir.clone());
    let output = args.output.unwrap_or_else(|| ctx.config.output_dir.clone());

    let named = DirectorySource::new(&input)
        .load()
        .with_context(|| format!("loading snapshots from {}", input.display()))?;
    if ctx.text() {
        println!("Merging {} snapshots from {}", named.len().to_string().bold(), input.display());
        if named.is_empty() {
            println!("  {} no snapshots found; reports will be empty", "warning:".yellow());
        }
    }

    let snapshots: Vec<_> = named.into_iter().map(|n| n.snapshot).collect();
    let report = merge_data(&snapshots);
    write_views(ctx, &output, &report, &ReportView::ALL)?;
    print_stats(ctx, &report.stats());
    Ok(())
}

fn cmd_summarize(ctx: &Context, args: SummarizeArgs) -> anyhow::Result<()> {
    let output = match args.output {
        Some(dir) => dir,
        None => args
            .details
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let details = read_json(&args.details)?;
    let report: MergedReport = serde_json::from_value(details)
        .with_context(|| format!("{} is not a details report", args.details.display()))?;
    write_views(ctx, &output, &report, &[ReportView::Concise, ReportView::ExtraConcise])?;
    print_stats(ctx, &report.stats());
    Ok(())
}

fn cmd_record(ctx: &Context, args: RecordArgs) -> anyhow::Result<()> {
    let dir = args.dir.unwrap_or_else(|| ctx.config.snapshots_dir.clone());
    let platform = args.platform.unwrap_or_else(default_platform_key);
    let snapshot = read_snapshot(&args.file)?;
    let options = RecordOptions {
        indent: ctx.config.indent,
        max_attempts: ctx.config.max_path_attempts,
        check_overwrite: !args.no_check,
    };

    let outcome = record_snapshot(&dir, &platform, &snapshot, &options)?;
    match (&outcome, ctx.format) {
        (RecordOutcome::Written(path), OutputFormat::Text) => {
            println!("{} Recorded {} classes to {}", "✓".green().bold(), snapshot.len(), path.display().to_string().bold());
        }
        (RecordOutcome::Unchanged, OutputFormat::Text) => {
            println!("No write to {} needed (same as existing snapshot)", dir.display());
        }
        (RecordOutcome::Written(path), OutputFormat::Json) => {
            println!("{}", serde_json::json!({"written": path.display().to_string()}));
        }
        (RecordOutcome::Unchanged, OutputFormat::Json) => {
            println!("{}", serde_json::json!({"written": null}));
        }
    }
    Ok(())
}

fn cmd_import(ctx: &Context, args: ImportArgs) -> anyhow::Result<()> {
    let artifacts = args.artifacts.unwrap_or_else(|| ctx.config.artifacts_dir.clone());
    let dir = args.dir.unwrap_or_else(|| ctx.config.snapshots_dir.clone());

    let report = import_artifacts(&artifacts, &dir, ctx.config.indent)
        .with_context(|| format!("importing artifacts from {}", artifacts.display()))?;

    if !ctx.text() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    for name in &report.written {
        println!("  {} {}", "written:".green(), name);
    }
    for name in &report.unchanged {
        println!("  {} {}", "unchanged:".dimmed(), name);
    }
    for dump in &report.dumped {
        println!("  {} {}", "conflict, dumped:".red(), dump.display());
    }
    if report.has_conflicts() {
        println!("{} Some artifacts differ from existing snapshots; see {}", "!".yellow().bold(), dir.join(tkd_store::import::DUMP_DIR).display());
    } else {
        println!("{} Import complete.", "✓".green().bold());
    }
    Ok(())
}

fn write_views(ctx: &Context, dir: &Path, report: &MergedReport, views: &[ReportView]) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for view in views {
        if ctx.text() {
            println!("Writing {} file", view.label());
        }
        let path = dir.join(view.file_name());
        write_json(&path, &view.render(report), ctx.config.indent)?;
        tracing::debug!(view = %view, path = %path.display(), "report written");
    }
    Ok(())
}

fn print_stats(ctx: &Context, stats: &ReportStats) {
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::json!(stats)),
        OutputFormat::Text => {
            println!("{} Merged {} classes, {} attributes", "✓".green().bold(), stats.classes.to_string().bold(), stats.attributes);
            println!("  identical: {}", stats.identical.to_string().green());
            println!("  type diff: {}", stats.type_diff.to_string().yellow());
            println!("  different: {}", stats.different.to_string().red());
        }
    }
}
