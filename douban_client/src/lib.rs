mod consts;
mod error;
mod parsing;
mod result;
mod selectors;

use reqwest::{header, Client, Url};
use scraper::Html;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use crate::consts::PAGE_SIZE;
use crate::consts::HOST;
pub use crate::error::Error;
use crate::error::Result;
use crate::parsing::parse_collect_page;
pub use crate::result::*;

/// Douban splits collection listings across three subdomains, one per kind
/// of content. The mode also decides the per-entry markup and the
/// thumbnail-to-full-size URL rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Book,
    Movie,
    Music,
}

impl Mode {
    pub(crate) fn subdomain(&self) -> &'static str {
        match self {
            Mode::Book => "book",
            Mode::Movie => "movie",
            Mode::Music => "music",
        }
    }

    /// Rewrite a grid thumbnail URL into its full-size variant.
    pub fn large_image_url(&self, thumbnail_url: &str) -> String {
        match self {
            Mode::Movie => thumbnail_url.replace("s_ratio_poster", "l_ratio_poster"),
            Mode::Book | Mode::Music => thumbnail_url.replace("subject/s", "subject/l"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.subdomain())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "book" => Ok(Mode::Book),
            "movie" => Ok(Mode::Movie),
            "music" => Ok(Mode::Music),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DoubanClient {
    client: reqwest::Client,
}

impl DoubanClient {
    /// Build a client sending `User-Agent` on every request, and `Cookie`
    /// only when a non-empty cookie is given.
    pub fn new(user_agent: &str, cookie: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(user_agent)?);
        if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
            headers.insert(header::COOKIE, header::HeaderValue::from_str(cookie)?);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(DoubanClient { client })
    }

    /// Fetch one page of a user's collection listing, `offset` entries in.
    /// Entries come back in the order served: newest marked date first.
    pub async fn collect_page(&self, user_id: &str, mode: Mode, offset: u32) -> Result<CollectPage> {
        let mut url = Url::parse(&format!("https://{}.{}", mode.subdomain(), HOST))?;
        url.set_path(&format!("/people/{}/collect", user_id));
        url.query_pairs_mut().extend_pairs([
            ("start", offset.to_string().as_str()),
            ("sort", "time"),
            ("rating", "all"),
            ("filter", "all"),
            ("mode", "grid"),
        ]);
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status { status, body });
        }
        log(mode, offset, &body).await?;

        let doc = Html::parse_document(&body);
        parse_collect_page(&doc, mode)
    }
}

async fn log(mode: Mode, offset: u32, content: &str) -> Result<()> {
    use std::path::PathBuf;
    use tokio::{fs::File, io::AsyncWriteExt};

    if let Ok(dir) = std::env::var("CLIENT_LOG_DIR") {
        let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filepath = PathBuf::from(dir).join(format!("douban_{}_{}_{}.html", mode, offset, time));
        let mut file = File::create(filepath).await?;
        file.write_all(content.as_bytes()).await?;
    }
    Ok(())
}
