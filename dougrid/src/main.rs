mod cli;
mod download;
mod error;
mod grid;
mod walk;

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use douban_client::{DoubanClient, Mode};

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::walk::YearFilter;

#[tokio::main]
async fn main() {
    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .unwrap()
        .add_directive("hyper=info".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap())
        .add_directive("html5ever=info".parse().unwrap())
        .add_directive("selectors=info".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Run; the entry point alone decides process termination
    let args = cli::parse_lenient();
    if let Err(err) = run(args).await {
        tracing::error!("{err}");
        if matches!(err, Error::Client(douban_client::Error::Status { .. })) {
            tracing::info!("Please specify a valid cookie and try again.");
        }
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    // Fails before any network call on a malformed year
    let target_year: YearFilter = args.year.parse()?;

    // Music covers are square, keep the tiles square too
    let (width, height) = match args.mode {
        Mode::Music => (args.width, args.width),
        Mode::Book | Mode::Movie => (args.width, args.height),
    };

    tokio::fs::create_dir_all(&args.cache_folder).await?;
    tokio::fs::create_dir_all(&args.output_folder).await?;

    let client = DoubanClient::new(&args.user_agent, args.cookie.as_deref())?;
    let image_urls = walk::walk_collection(&client, &args.id, args.mode, target_year).await?;

    let (verb, noun) = match args.mode {
        Mode::Book => ("read", "books"),
        Mode::Movie => ("watched", "movies"),
        Mode::Music => ("listened to", "songs"),
    };
    tracing::info!("You have {} {} {} in {}.", verb, image_urls.len(), noun, target_year);

    if image_urls.is_empty() {
        tracing::info!("Nothing to do.");
        return Ok(());
    }

    tracing::info!("Start downloading images...");
    let image_paths = download::download_images(&image_urls, &args.cache_folder, args.mode).await?;
    tracing::info!("Download finished.");

    let date = chrono::Local::now().format("%Y%m%d");
    let output_path = args.output_folder.join(format!("{}_{}_{}.png", args.id, args.mode, date));
    tracing::info!("Generating image grid to {}...", output_path.display());
    grid::compose_grid(&image_paths, width, height, args.column, &output_path)?;
    tracing::info!("Image grid generated at {}.", output_path.display());

    Ok(())
}
