use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use pdbxml_report::commands::convert::{self, ConvertOptions};
use pdbxml_report::pdbxml::{ExtractOptions, TagMatch};
use pdbxml_report::utils::color;
use pdbxml_report::{OutputFormat, ReportOptions, TestSelection};

#[derive(Parser)]
#[command(name = "pdbxml-report")]
#[command(
    about = "Convert PDBXML battery test exports into spreadsheet reports",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// PDBXML exports to convert (`.zst` compressed files are accepted)
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Directory for generated reports [default: directory of the first input]
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "xlsx")]
    format: OutputFormat,

    /// Which tests to report
    #[arg(long, default_value = "all")]
    mode: TestSelection,

    /// Match `tag` names case-sensitively (array names always ignore case)
    #[arg(long)]
    exact_tags: bool,

    /// Namespace URI the PDBXML elements are declared in
    #[arg(long)]
    namespace: Option<String>,

    /// Skip the impedance and voltage charts
    #[arg(long)]
    no_charts: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize color handling (respects NO_COLOR)
    color::init_color();

    // RUST_LOG still wins over --debug
    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let options = ConvertOptions {
        extract: ExtractOptions {
            mode: cli.mode.into(),
            tag_match: if cli.exact_tags {
                TagMatch::Exact
            } else {
                TagMatch::CaseInsensitive
            },
            namespace: cli.namespace,
        },
        report: ReportOptions {
            charts: !cli.no_charts,
        },
        format: cli.format,
    };

    convert::execute(
        &cli.inputs,
        cli.output.as_deref(),
        cli.output_dir.as_deref(),
        &options,
    )
}
