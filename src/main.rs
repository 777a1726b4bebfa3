// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use dsmovie::application::commands;
use dsmovie::application::dto::{MovieInputDto, MovieQueryDto, ScoreDto};
use dsmovie::application::{AppState, ErrorResponse};
use dsmovie::config::AppConfig;
use dsmovie::db::{
    create_connection_pool, get_database_path, get_database_stats, initialize_database,
    seed_database, verify_database_integrity,
};
use dsmovie::security::RequestContext;

#[derive(Parser)]
#[command(name = "dsmovie", version, about = "Movie catalog and rating backend")]
struct Cli {
    /// Configuration file (defaults to {CONFIG_DIR}/dsmovie/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides the configured path
    #[arg(long, global = true, env = "DSMOVIE_DATABASE")]
    database: Option<PathBuf>,

    /// Username to act as
    #[arg(long = "as", global = true, value_name = "USERNAME")]
    as_user: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or upgrade the database schema
    Init,
    /// Load demo users, roles and movies
    Seed,
    /// Integrity check, then row counts and file size
    Stats,
    /// Movie catalog
    Movies {
        #[command(subcommand)]
        command: MovieCommand,
    },
    /// Ratings
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// User directory
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },
}

#[derive(Subcommand)]
enum MovieCommand {
    /// Page through movies, optionally filtered by title
    List {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
    },
    Get {
        id: i64,
    },
    /// Add a movie (ROLE_ADMIN)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: String,
    },
    /// Replace title and image (ROLE_ADMIN)
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: String,
    },
    /// Delete an unrated movie (ROLE_ADMIN)
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
enum ScoreCommand {
    /// Rate a movie between 0 and 5
    Set {
        movie_id: i64,
        score: f64,
    },
    /// Show your own rating of a movie
    Get {
        movie_id: i64,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Username and authorities of a login (ROLE_ADMIN)
    Show {
        username: String,
    },
    /// Your own profile
    Me,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. CONFIGURATION
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.database.clone() {
        config.database.path = Some(path);
    }

    let default_filter = if cli.verbose {
        "dsmovie=debug"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // 2. INFRASTRUCTURE
    let db_path = get_database_path(&config.database)?;
    log::debug!("Using database {}", db_path.display());

    let pool = Arc::new(create_connection_pool(&config.database)?);
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
    }

    // 3. APPLICATION STATE
    let state = AppState::from_pool(pool.clone(), config.pagination.clone());
    let ctx = match cli.as_user {
        Some(username) => RequestContext::for_username(username),
        None => RequestContext::anonymous(),
    };

    // 4. DISPATCH
    match cli.command {
        Command::Init => {
            log::info!("Database ready at {}", db_path.display());
            print_json(&db_path)
        }
        Command::Seed => {
            let conn = pool.get()?;
            seed_database(&conn)?;
            print_json(&get_database_stats(&conn)?)
        }
        Command::Stats => {
            let conn = pool.get()?;
            verify_database_integrity(&conn)?;
            print_json(&get_database_stats(&conn)?)
        }
        Command::Movies { command } => match command {
            MovieCommand::List { title, page, size } => respond(commands::list_movies(
                &state,
                MovieQueryDto { title, page, size },
            )),
            MovieCommand::Get { id } => respond(commands::get_movie(&state, id)),
            MovieCommand::Add { title, image } => {
                respond(commands::create_movie(&state, &ctx, movie_input(title, image)))
            }
            MovieCommand::Update { id, title, image } => respond(commands::update_movie(
                &state,
                &ctx,
                id,
                movie_input(title, image),
            )),
            MovieCommand::Delete { id } => respond(commands::delete_movie(&state, &ctx, id)),
        },
        Command::Score { command } => match command {
            ScoreCommand::Set { movie_id, score } => {
                respond(commands::save_score(&state, &ctx, ScoreDto { movie_id, score }))
            }
            ScoreCommand::Get { movie_id } => {
                respond(commands::get_own_score(&state, &ctx, movie_id))
            }
        },
        Command::Users { command } => match command {
            UserCommand::Show { username } => {
                respond(commands::get_user_details(&state, &ctx, &username))
            }
            UserCommand::Me => respond(commands::get_me(&state, &ctx)),
        },
    }
}

fn movie_input(title: String, image: String) -> MovieInputDto {
    MovieInputDto {
        title,
        image,
        score: None,
        count: None,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}

/// Print a command result; errors go to stderr with a non-zero exit code
fn respond<T: Serialize>(result: Result<T, ErrorResponse>) -> Result<ExitCode> {
    match result {
        Ok(value) => print_json(&value),
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Ok(if err.status >= 500 {
                ExitCode::FAILURE
            } else {
                ExitCode::from(2)
            })
        }
    }
}
