use crate::wall::Wall;
use aws_config::BehaviorVersion;
use mural_common::{
    model::image::{ImageKind, ImageUpload},
    util::relative_time,
};
use mural_store::{blob::BlobStoreClient, client::PostStoreClient};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::{io::Write, path::Path, sync::Arc};
use thiserror::Error;
use time::UtcDateTime;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod wall;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error connecting to the row store: {0}")]
    Database(sqlx::Error),
    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Env {
    database_url: String,
    #[serde(default = "default_blob_bucket")]
    blob_bucket: String,
    blob_public_url: String,
    #[serde(default)]
    wall_owner: Option<String>,
}

fn default_blob_bucket() -> String {
    "wall-uploads".to_owned()
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mural_app=debug,mural_store=debug,mural_common=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&env.database_url)
        .await
        .map_err(InitError::Database)?;
    let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

    let posts = Arc::new(PostStoreClient::new(pool));
    let blobs = Arc::new(BlobStoreClient::new(
        aws_sdk_s3::Client::new(&sdk_config),
        env.blob_bucket,
        env.blob_public_url,
    ));
    let mut wall = Wall::new(posts, blobs);

    match &env.wall_owner {
        Some(owner) => println!("The Wall of {owner}"),
        None => println!("The Wall"),
    }

    if let Err(error) = wall.refresh().await {
        println!("Could not load the wall: {error}");
    }
    render_feed(&wall);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if !read_command(&mut lines, &mut wall).await? {
            break;
        }
    }

    Ok(())
}

/// One prompt/command round trip. Returns `false` once input is exhausted or
/// the user quits.
async fn read_command(
    lines: &mut Lines<BufReader<Stdin>>,
    wall: &mut Wall,
) -> Result<bool, InitError> {
    print!("> ");
    std::io::stdout().flush().map_err(InitError::Terminal)?;

    let Some(line) = lines.next_line().await.map_err(InitError::Terminal)? else {
        return Ok(false);
    };
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "" => {}
        "help" => print_help(),
        "write" => match wall.composer.set_text(rest.trim().to_owned()) {
            Ok(()) => println!(
                "Draft set, {} characters remaining.",
                wall.composer.remaining_chars()
            ),
            Err(error) => println!("{error}"),
        },
        "attach" => attach(wall, rest.trim()).await,
        "detach" => {
            if wall.composer.detach().is_some() {
                println!("Photo removed.");
            } else {
                println!("No photo attached.");
            }
        }
        "share" => {
            println!("Sharing...");
            match wall.share().await {
                Ok(_) => {
                    println!("Shared.");
                    render_feed(wall);
                }
                Err(error) => println!("{error}"),
            }
        }
        "more" => match wall.load_more().await {
            Ok(()) => render_feed(wall),
            Err(error) => println!("Could not load older posts: {error}"),
        },
        "refresh" => match wall.refresh().await {
            Ok(()) => render_feed(wall),
            Err(error) => println!("Could not load the wall: {error}"),
        },
        "quit" | "exit" => return Ok(false),
        other => println!("Unknown command '{other}', type 'help'."),
    }

    Ok(true)
}

async fn attach(wall: &mut Wall, path: &str) {
    if path.is_empty() {
        println!("Usage: attach <path>");
        return;
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(error) => {
            println!("Could not read {path}: {error}");
            return;
        }
    };
    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_owned();
    let Some(kind) = ImageKind::from_file_name(&file_name) else {
        println!("{file_name} is not a JPG, PNG or GIF.");
        return;
    };

    match ImageUpload::new(file_name, kind.mime(), bytes) {
        Ok(image) => {
            wall.composer.attach(image);
            println!("Photo attached.");
        }
        Err(error) => println!("{error}"),
    }
}

fn render_feed(wall: &Wall) {
    println!();
    if wall.feed.posts().is_empty() {
        println!("  Nothing on the wall yet.");
    }

    let now = UtcDateTime::now();
    for post in wall.feed.posts() {
        let when = relative_time(post.created_at, now);
        if post.body.is_empty() {
            println!("  ({when})");
        } else {
            println!("  {}  ({when})", post.body.get());
        }
        if let Some(url) = &post.image_url {
            println!("    photo: {url}");
        }
    }

    if wall.feed.can_load_more() {
        println!("  ('more' loads older posts)");
    } else if !wall.feed.posts().is_empty() {
        println!("  -- end of feed --");
    }
    println!();
}

fn print_help() {
    println!("  write <text>   set the draft message (280 characters max)");
    println!("  attach <path>  attach a JPG, PNG or GIF up to 5 MB");
    println!("  detach         remove the attached photo");
    println!("  share          post the draft to the wall");
    println!("  more           load older posts");
    println!("  refresh        reload the newest posts");
    println!("  quit           leave");
}
