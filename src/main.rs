mod commands;
mod core;
mod manifest;
mod release;
mod steps;

use clap::Parser;
use core::config::SyncConfig;
use core::coordinator::VersionCoordinator;
use core::error::{SyncError, SyncResult, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Set one release version across every manifest in the repository
#[derive(Parser)]
#[command(name = "versync")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// New version, e.g. 1.25.0 (omit to list current versions)
  new_version: Option<String>,

  /// Repository root (default: current directory)
  #[arg(short = 'C', long, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Descriptor table to use instead of versync.toml discovery
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Skip the build sanity check after rewriting
  #[arg(long)]
  no_build_check: bool,

  /// Do not stage the rewritten files with git
  #[arg(long)]
  no_stage: bool,

  /// Output results in JSON format
  #[arg(long)]
  json: bool,

  /// Show debug logs on stderr
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr so stdout stays parseable with --json.
/// `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbose: bool) {
  let fallback = if verbose { "versync=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn run(cli: Cli) -> SyncResult<()> {
  let root = match cli.root {
    Some(root) => root,
    None => std::env::current_dir().map_err(|e| SyncError::from(e).context("Failed to get current directory"))?,
  };

  let mut config = SyncConfig::resolve(&root, cli.config.as_deref())?;
  if cli.no_build_check {
    config.post.build_check.clear();
  }
  if cli.no_stage {
    config.post.stage = false;
  }

  let coordinator = VersionCoordinator::new(&root, config);
  match cli.new_version {
    Some(version) => commands::run_sync(&coordinator, &version, cli.json),
    None => commands::run_show(&coordinator, cli.json),
  }
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if let Err(e) = run(cli) {
    handle_error(e);
  }
}

fn handle_error(err: SyncError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
