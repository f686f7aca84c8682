#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use sift_core::config::load_user_config;
use std::env;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sift: exact, full-text, vector and hybrid document search",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format. Defaults to pretty on a terminal and text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Project",
        about = "Initialize a sift project",
        long_about = "Create .sift/ with a default config and an empty document store.",
        after_help = "EXAMPLES:\n    # Initialize a project in the current directory\n    sift init\n\n    # Rewrite the config of an existing project\n    sift init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Documents",
        about = "Add one document",
        long_about = "Add a document to the store, or replace one when --id names an existing document.",
        after_help = "EXAMPLES:\n    # Add a document with a store-assigned id\n    sift add --title \"Red Car\" --content \"A fast red car\"\n\n    # Replace document 7\n    sift add --id 7 --title \"Blue Sky\" --content \"A clear blue sky\""
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Documents",
        about = "Import documents from JSON lines",
        long_about = "Upsert documents from a JSON-lines file. Nothing is written if any line is invalid.",
        after_help = "EXAMPLES:\n    # Import a file\n    sift import documents.jsonl\n\n    # Emit machine-readable output\n    sift import documents.jsonl --format json"
    )]
    Import(cmd::import::ImportArgs),

    #[command(next_help_heading = "Search")]
    Search(cmd::search::SearchArgs),

    #[command(
        next_help_heading = "Project",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    sift completions bash\n\n    # Generate zsh completions\n    sift completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SIFT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "sift=debug,info"
        } else {
            "sift=info,warn"
        })
    });

    let format = env::var("SIFT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

impl Cli {
    /// Resolve the output mode from flags, `FORMAT`, and the user config.
    fn output_mode(&self) -> OutputMode {
        let user = load_user_config().unwrap_or_else(|err| {
            warn!("ignoring unreadable user config: {err:#}");
            sift_core::config::UserConfig::default()
        });
        resolve_output_mode(self.format, self.json, user.output.as_deref())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        debug!("verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Add(ref args) => cmd::add::run_add(args, output, &project_root),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &project_root),
        Commands::Search(ref args) => cmd::search::run_search(args, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
