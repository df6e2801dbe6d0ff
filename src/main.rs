use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use genresort::{cli, config, error, warning};

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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Organize a Spotify playlist by genre and write it to a file
    Organize(OrganizeOptions),

    /// Organize a song list ("Song - Artist" per line) by genre
    Text(TextOptions),

    /// Run the HTTP service
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct OrganizeOptions {
    /// Playlist link; defaults to SPOTIFY_PLAYLIST_LINK
    #[clap(long)]
    pub link: Option<String>,

    /// Output file
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TextOptions {
    /// File with one song per line; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Output file
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind; defaults to SERVER_ADDRESS
    #[clap(long)]
    pub address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("{}", e),
    };

    let result = match cli.command {
        Command::Organize(opt) => cli::organize(&cfg, opt.link, opt.output).await,
        Command::Text(opt) => cli::text(&cfg, opt.file, opt.output).await,
        Command::Serve(opt) => cli::serve(&cfg, opt.address).await,
        Command::Completions(_) => Ok(()),
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
