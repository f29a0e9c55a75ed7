use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use colored::Colorize;

use somberlist::{
    Res, cli,
    config::{self, Config},
    error,
    pipeline::somber::DEFAULT_RESERVE,
};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Discover an artist's slow and somber tracks and build a playlist
    Somber(SomberOptions),

    /// Build a playlist from a fixed list of track titles
    Curated(CuratedOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SomberOptions {
    /// Artist to build the playlist for
    #[clap(long, default_value = "Juice WRLD")]
    artist: String,

    /// Number of tracks in the playlist; prompts when omitted
    #[clap(long)]
    count: Option<usize>,

    /// Slots reserved for keyword-search finds
    #[clap(long, default_value_t = DEFAULT_RESERVE)]
    reserve: usize,

    /// Market (ISO 3166-1 alpha-2) for release lookups
    #[clap(long)]
    market: Option<String>,

    /// Playlist name
    #[clap(long)]
    name: Option<String>,

    /// Playlist description
    #[clap(long)]
    description: Option<String>,

    /// Create a private playlist
    #[clap(long)]
    private: bool,

    /// Discover and score without creating a playlist
    #[clap(long)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CuratedOptions {
    /// Artist the titles belong to
    #[clap(long)]
    artist: String,

    /// File with one track title per line
    #[clap(long)]
    titles_file: Option<PathBuf>,

    /// Track titles
    titles: Vec<String>,

    /// Playlist name
    #[clap(long)]
    name: Option<String>,

    /// Playlist description
    #[clap(long)]
    description: Option<String>,

    /// Create a private playlist
    #[clap(long)]
    private: bool,

    /// Resolve titles without creating a playlist
    #[clap(long)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = run(cli.command).await {
        print_remediation(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Res<()> {
    let config = Arc::new(Config::from_env()?);

    match command {
        Command::Auth => cli::auth(config).await,
        Command::Somber(opt) => {
            cli::somber(
                config,
                cli::SomberArgs {
                    artist: opt.artist,
                    count: opt.count,
                    reserve: opt.reserve,
                    market: opt.market,
                    name: opt.name,
                    description: opt.description,
                    private: opt.private,
                    dry_run: opt.dry_run,
                },
            )
            .await
        }
        Command::Curated(opt) => {
            cli::curated(
                config,
                cli::CuratedArgs {
                    artist: opt.artist,
                    titles: opt.titles,
                    titles_file: opt.titles_file,
                    name: opt.name,
                    description: opt.description,
                    private: opt.private,
                    dry_run: opt.dry_run,
                },
            )
            .await
        }
        Command::Completions(_) => Ok(()),
    }
}

fn print_remediation(message: &str) {
    println!("[{}] Error: {}", "!".red().bold(), message);
    println!("Make sure:");
    println!(
        "1. Your Spotify credentials are valid ({})",
        config::env_path().display()
    );
    println!(
        "2. You are logged in (run {} auth)",
        env!("CARGO_PKG_NAME")
    );
    println!("3. You have an internet connection");
}
