mod commands;
mod context;
mod ui;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use context::Context;

#[derive(Parser)]
#[command(name = "grdsync", version, about = "Keep branded GRD/GRDP string resources in sync with upstream")]
struct Cli {
    /// Checkout root (defaults to src_dir from grdsync.toml, then the current directory)
    #[arg(long, global = true)]
    src_dir: Option<PathBuf>,

    /// Use this config file instead of searching for grdsync.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors to the console
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the parts a resource document declares, in order
    Parts {
        file: PathBuf,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Print the upstream -> downstream mapping table
    Map {
        /// Print downstream -> upstream instead
        #[arg(long)]
        inverse: bool,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List downstream resource paths
    Paths {
        #[arg(long, default_value = "all", value_parser = ["all", "top-level", "generated", "downstream-only"])]
        kind: String,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Report downstream parts that upstream documents no longer declare
    Drift {
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
        /// Exit with an error when drift is found
        #[arg(long)]
        strict: bool,
        /// List downstream documents that do not exist yet instead of failing
        #[arg(long)]
        allow_missing_downstream: bool,
    },

    /// Overwrite generated downstream files with their upstream sources
    Sync {
        #[arg(long)]
        dry_run: bool,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
        /// Exit with an error when drift is found
        #[arg(long)]
        strict: bool,
        /// Bootstrap a fresh checkout: tolerate downstream documents that do not exist yet
        #[arg(long)]
        allow_missing_downstream: bool,
    },

    /// List messages.json files referenced by Greaselion rules
    Greaselion {
        /// Site-specific scripts checkout. Relative paths (and the default,
        /// ../../../brave-site-specific-scripts) resolve against the current
        /// directory; a path from grdsync.toml resolves against src_dir
        #[arg(long)]
        extension_path: Option<PathBuf>,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Dump JSON schemas of the machine-readable outputs
    Schema {
        #[arg(long, default_value = "./docs/assets/schemas")]
        out_dir: PathBuf,
    },
}

trait Runnable {
    fn run(self, ctx: &Context) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, ctx: &Context) -> Result<()> {
        let cmd_name = format!("{:?}", self);
        info!(event = "command_started", cmd = %cmd_name);

        let result = match self {
            Commands::Parts { file, format } => commands::parts::run_parts(ctx, file, &format),
            Commands::Map { inverse, format } => commands::map::run_map(ctx, inverse, &format),
            Commands::Paths { kind, format } => commands::paths::run_paths(ctx, &kind, &format),
            Commands::Drift {
                format,
                strict,
                allow_missing_downstream,
            } => commands::drift::run_drift(ctx, &format, strict, allow_missing_downstream),
            Commands::Sync {
                dry_run,
                format,
                strict,
                allow_missing_downstream,
            } => commands::sync::run_sync(ctx, dry_run, &format, strict, allow_missing_downstream),
            Commands::Greaselion {
                extension_path,
                format,
            } => commands::greaselion::run_greaselion(ctx, extension_path, &format),
            Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
        };

        match &result {
            Ok(_) => info!(event = "command_finished", cmd = %cmd_name),
            Err(e) => error!(event = "command_failed", cmd = %cmd_name, error = ?e),
        }

        result
    }
}

fn init_tracing(quiet: bool) -> WorkerGuard {
    let file_appender = rolling::daily("logs", "grdsync.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    let ctx = Context::load(cli.src_dir, cli.config, use_color)?;
    debug!(event = "context_ready", src_dir = %ctx.src_dir.display());

    cli.cmd.run(&ctx)
}
