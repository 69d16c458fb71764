use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ipa-catalog-sync",
    version,
    about = "Sync an app catalog JSON with a folder of .ipa archives: reads bundle metadata from each archive and updates or appends the matching catalog entry, keeping curated fields."
)]
pub struct Args {
    #[arg(long, default_value = "repo.json", help = "Catalog file to read and rewrite")]
    pub catalog: PathBuf,
    #[arg(long, default_value = "ipas", help = "Directory holding the archives")]
    pub ipa_dir: PathBuf,
    #[arg(
        long,
        default_value = "ipa",
        help = "Archive file extension, without the dot"
    )]
    pub extension: String,
    #[arg(
        long,
        help = "Abort on the first corrupt archive or malformed Info.plist instead of skipping it"
    )]
    pub strict: bool,
    #[arg(long, help = "Process archives but leave the catalog file untouched")]
    pub dry_run: bool,
    #[arg(long, help = "Write a per-archive sync report to this path")]
    pub report: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Json, help = "Sync report format (json or csv)")]
    pub report_format: ReportFormat,
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Csv,
}

pub fn parse_args() -> Args {
    Args::parse()
}
