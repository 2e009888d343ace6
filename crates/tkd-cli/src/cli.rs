use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tkd",
    about = "Merge per-platform GUI toolkit default snapshots into one report",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file overriding the default directory layout
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge every snapshot and write details, concise and extra-concise reports
    Merge(MergeArgs),
    /// Regenerate the concise reports from an existing details.json
    Summarize(SummarizeArgs),
    /// File a captured snapshot under a non-colliding name
    Record(RecordArgs),
    /// Import snapshots from downloaded CI artifacts
    Import(ImportArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// Directory of snapshot files
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Directory the reports are written to
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SummarizeArgs {
    pub details: PathBuf,
    /// Defaults to the directory holding the details file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct RecordArgs {
    pub file: PathBuf,
    /// Platform key used in the stored file name
    #[arg(long)]
    pub platform: Option<String>,
    /// Snapshot directory
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Always write to the first candidate name
    #[arg(long)]
    pub no_check: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(long)]
    pub artifacts: Option<PathBuf>,
    /// Snapshot directory
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["tkd", "merge"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert!(args.input.is_none());
            assert!(args.output.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_dirs() {
        let cli = Cli::try_parse_from(["tkd", "merge", "--input", "ttk_defaults", "--output", "out"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.input, Some(PathBuf::from("ttk_defaults")));
            assert_eq!(args.output, Some(PathBuf::from("out")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_summarize() {
        let cli = Cli::try_parse_from(["tkd", "summarize", "merged/details.json"]).unwrap();
        if let Command::Summarize(args) = cli.command {
            assert_eq!(args.details, PathBuf::from("merged/details.json"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_record() {
        let cli = Cli::try_parse_from(["tkd", "record", "curr.json", "--platform", "win-amd64", "--no-check"]).unwrap();
        if let Command::Record(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("curr.json"));
            assert_eq!(args.platform, Some("win-amd64".into()));
            assert!(args.no_check);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_record_requires_file() {
        assert!(Cli::try_parse_from(["tkd", "record"]).is_err());
    }

    #[test]
    fn parse_import() {
        let cli = Cli::try_parse_from(["tkd", "import", "--artifacts", "dl"]).unwrap();
        if let Command::Import(args) = cli.command {
            assert_eq!(args.artifacts, Some(PathBuf::from("dl")));
            assert!(args.dir.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from(["tkd", "--verbose", "--format", "json", "--config", "tkd.toml", "merge"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("tkd.toml")));
    }

    #[test]
    fn globals_after_subcommand() {
        let cli = Cli::try_parse_from(["tkd", "merge", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Text);
    }
}
