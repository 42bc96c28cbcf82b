use std::path::PathBuf;
use std::str::FromStr;

use chrono::Datelike;
use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, FromArgMatches, Parser};

use douban_client::Mode;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

#[derive(Parser, Debug)]
#[command(name = "dougrid", about = "Compose a Douban user's collection covers into one grid image")]
pub struct Cli {
    /// Douban user ID.
    #[arg(long)]
    pub id: String,

    /// Collection kind: book, movie or music.
    #[arg(long, default_value = "book", value_parser = Mode::from_str)]
    pub mode: Mode,

    /// Target year; "all" keeps every year.
    #[arg(long, default_value_t = chrono::Local::now().year().to_string())]
    pub year: String,

    /// Tile width in pixels.
    #[arg(long, default_value_t = 600)]
    pub width: u32,

    /// Tile height in pixels; music covers are square, so music ignores
    /// this and uses the width.
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Number of grid columns.
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    pub column: u32,

    /// User-Agent header sent with every request.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Folder the downloaded covers are cached under.
    #[arg(long, default_value = "cache")]
    pub cache_folder: PathBuf,

    /// Cookie header; set this if the listing request is refused.
    #[arg(long)]
    pub cookie: Option<String>,

    /// Folder the composed grid image is written to.
    #[arg(long, default_value = "output")]
    pub output_folder: PathBuf,
}

/// Parse the command line, reporting unknown flags and dropping them instead
/// of failing. Every other parse error still exits with clap's message.
pub fn parse_lenient() -> Cli {
    parse_lenient_from(std::env::args().collect())
}

fn parse_lenient_from(mut argv: Vec<String>) -> Cli {
    loop {
        let result = Cli::command().try_get_matches_from(&argv);
        match result {
            Ok(matches) => return Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit()),
            Err(err) if err.kind() == ErrorKind::UnknownArgument => {
                let Some(unknown) = err.get(ContextKind::InvalidArg).map(|v| v.to_string()) else {
                    err.exit()
                };
                // Drop the offending token at its own position, and the value
                // token following a bare unknown flag. Values of known flags
                // elsewhere in argv are left alone.
                let Some(index) = argv.iter().position(|arg| {
                    *arg == unknown || arg.strip_prefix(&unknown).is_some_and(|rest| rest.starts_with('='))
                }) else {
                    err.exit()
                };
                if argv[index] == unknown
                    && unknown.starts_with('-')
                    && argv.get(index + 1).is_some_and(|next| !next.starts_with('-'))
                {
                    argv.remove(index + 1);
                }
                argv.remove(index);
                tracing::warn!("Unknown argument: {unknown}");
            }
            Err(err) => err.exit(),
        }
    }
}
