use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod client;
mod console;
mod feedback;
mod files;
mod models;
mod pipeline;
mod routes;
mod session;
mod state;
mod tags;
mod validation;
mod views;

#[cfg(test)]
mod testing;

use common::config::ApiConfig;
use common::cookies::CookieJar;
use common::error::ConsoleError;

use crate::{
    client::HttpCatalogClient,
    console::Console,
    feedback::TerminalFeedback,
    files::SelectedFile,
    models::ComicDraft,
    pipeline::{SubmitOutcome, UploadStatus},
    routes::{History, Route},
    state::AppState,
};

/// Admin console for the comics catalog
#[derive(Parser, Debug)]
#[command(name = "comic-admin", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the dashboard
    Dashboard,
    /// List all comics
    Comics,
    /// List the chapters of a comic
    Chapters { slug: String },
    /// Create a comic
    NewComic {
        #[arg(long)]
        title: String,
        #[arg(long)]
        desc: String,
        #[arg(long)]
        origin: String,
        /// Ongoing, Dropped or Stopped
        #[arg(long)]
        status: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        artist: String,
        /// Repeat for each genre
        #[arg(long = "genre")]
        genres: Vec<String>,
        #[arg(long)]
        cover: Option<PathBuf>,
    },
    /// Upload a chapter archive to a comic
    AddChapter {
        slug: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        archive: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run one command; `Ok(false)` when it ended in a reported failure
async fn run(cli: Cli) -> Result<bool> {
    let config = ApiConfig::from_env()?;
    info!("Using catalog API at {}", config.api_base_url);

    let history = Arc::new(History::new());
    let state = AppState {
        api: Arc::new(HttpCatalogClient::new(config.clone())?),
        tokens: Arc::new(CookieJar::new(config.cookie_jar_path.clone())),
        feedback: Arc::new(TerminalFeedback::new()),
        navigator: history.clone(),
        config,
    };
    let mut console = Console::new(state, history);

    let succeeded = match cli.command {
        Command::SignIn { email, password } => {
            match console.sign_in(&email, &password).await {
                Ok(()) => true,
                Err(ConsoleError::Validation(errors)) => {
                    eprintln!("{}", views::render_field_errors(&errors));
                    false
                }
                Err(_) => false,
            }
        }
        Command::Dashboard => show(&mut console, Route::Dashboard).await,
        Command::Comics => show(&mut console, Route::Comics).await,
        Command::Chapters { slug } => show(&mut console, Route::Comic(slug)).await,
        Command::NewComic {
            title,
            desc,
            origin,
            status,
            author,
            artist,
            genres,
            cover,
        } => {
            let mut draft = ComicDraft::new();
            draft.title = title;
            draft.description = desc;
            draft.origin = origin;
            draft.status = status;
            draft.author = author;
            draft.artist = artist;
            for mut input in genres {
                if !draft.genres.commit(&mut input) && !input.trim().is_empty() {
                    info!("Skipping duplicate genre: {}", input.trim());
                }
            }
            if let Some(path) = cover {
                draft
                    .cover_image
                    .select(SelectedFile::from_path(&path).await?)?;
            }
            let outcome = console.new_comic(&draft).await;
            report(outcome)
        }
        Command::AddChapter {
            slug,
            number,
            name,
            archive,
        } => {
            let archive = match archive {
                Some(path) => Some(SelectedFile::from_path(&path).await?),
                None => None,
            };
            match console.add_chapter(&slug, &number, &name, archive).await {
                Ok(outcome) => report(outcome),
                Err(_) => false,
            }
        }
    };

    let screens = console.follow().await.unwrap_or_default();
    for screen in screens {
        println!("{}", screen);
    }
    console.close();

    Ok(succeeded)
}

async fn show(console: &mut Console, route: Route) -> bool {
    match console.open(&route).await {
        Ok(Some(screen)) => {
            println!("{}", screen);
            true
        }
        Ok(None) | Err(_) => false,
    }
}

/// Print field errors a submission left; notices cover everything else
fn report(outcome: Option<SubmitOutcome>) -> bool {
    match outcome {
        None | Some(SubmitOutcome::Busy) => false,
        Some(SubmitOutcome::Invalid(errors)) => {
            eprintln!("{}", views::render_field_errors(&errors));
            false
        }
        Some(SubmitOutcome::Completed(status)) => {
            matches!(status, UploadStatus::Succeeded { .. })
        }
    }
}
