// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use song_quiz::config::QuizConfig;
use song_quiz::loader::spawn_load;
use song_quiz::player::CommandLauncher;
use song_quiz::repository::{RestSongRepository, SongRepository};
use song_quiz::ui::{App, Session};

/// Command-line arguments for song-quiz
#[derive(Parser, Debug)]
#[command(name = "song-quiz")]
#[command(about = "Guess the song from its YouTube clip")]
#[command(version)]
struct Args {
    /// Configuration file (.toml, .yaml or .yml)
    #[arg(short, long, env = "SONG_QUIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Backend project URL
    #[arg(long, env = "SUPABASE_URL")]
    url: Option<String>,

    /// Backend API key
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Table holding the songs
    #[arg(long)]
    table: Option<String>,

    /// Log file (the terminal is used by the UI)
    #[arg(long, default_value = "song-quiz.log")]
    log_file: PathBuf,

    /// Print the song list and exit
    #[arg(long)]
    list: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "song_quiz=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn load_config(args: &Args) -> Result<QuizConfig> {
    let mut config = match &args.config {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };

    if let Some(url) = &args.url {
        config.backend.url = url.clone();
    }
    if let Some(key) = &args.key {
        config.backend.api_key = key.clone();
    }
    if let Some(table) = &args.table {
        config.backend.table = table.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = load_config(&args)?;
    info!(url = %config.backend.url, table = %config.backend.table, "Starting song quiz");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let repository =
        RestSongRepository::new(&config.backend).context("Failed to create HTTP client")?;

    if args.list {
        let songs = runtime.block_on(repository.fetch_all_songs());
        for song in &songs {
            println!("{}", song.label());
        }
        return Ok(());
    }

    let loader = spawn_load(runtime.handle(), repository);
    let mut session =
        Session::new(config.quiz.round_size, config.player.clone()).with_loader(loader);

    if let Some(command) = config.player.open_command.as_deref() {
        let launcher = CommandLauncher::new(command).context("Invalid player.open_command")?;
        session = session.with_launcher(Box::new(launcher));
    }

    let mut app = App::new(session).context("Failed to set up terminal")?;
    app.set_frame_rate(config.ui.frame_rate);
    app.run().context("Terminal UI error")?;

    info!(
        score = app.session().quiz().score(),
        rounds = app.session().quiz().rounds_played(),
        "Quiz finished"
    );
    Ok(())
}
