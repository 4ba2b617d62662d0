use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use monthsync::{cli, config, context::SyncContext, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Defaults to `sync` when omitted
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add saved tracks to their monthly playlists
    Sync(SyncOptions),

    /// Authorize with Spotify and store the credential
    Auth,

    /// Delete playlists whose name matches a pattern
    Prune(PruneOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct SyncOptions {
    /// Show what would be created and added without changing anything
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PruneOptions {
    /// Regex matched against playlist names (default: monthly playlist names)
    #[clap(long)]
    pub pattern: Option<String>,

    /// Actually delete; without it matches are only listed
    #[clap(long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn context() -> SyncContext {
    match SyncContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    config::load_env();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Sync(SyncOptions::default())) {
        Command::Sync(opt) => cli::sync(&context(), opt.dry_run).await,
        Command::Auth => cli::auth(&context()).await,
        Command::Prune(opt) => cli::prune(&context(), opt.pattern, opt.yes).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
