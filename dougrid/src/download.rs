use std::path::{Path, PathBuf};

use douban_client::Mode;

use crate::error::{Error, Result};

/// Cache filename for an image URL: its trailing path segment.
/// Different URLs sharing a basename silently reuse the same cache file;
/// the cache is keyed by filename only, with no content verification.
fn cache_filename(url: &str) -> Result<&str> {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))
}

/// Download every URL into `{cache_dir}/{mode}/`, reusing files already
/// there, and return the local paths in input order. One GET per miss,
/// whole body written as-is; no retry.
pub async fn download_images(urls: &[String], cache_dir: &Path, mode: Mode) -> Result<Vec<PathBuf>> {
    let image_cache_dir = cache_dir.join(mode.to_string());
    tokio::fs::create_dir_all(&image_cache_dir).await?;

    let mut image_paths = Vec::with_capacity(urls.len());
    for url in urls {
        let filename = cache_filename(url)?;
        let image_path = image_cache_dir.join(filename);
        if tokio::fs::try_exists(&image_path).await? {
            tracing::info!("{} already exists, skip downloading", filename);
        } else {
            tracing::info!("Downloading {} to {}", url, image_path.display());
            let response = reqwest::get(url).await?.error_for_status()?;
            let body = response.bytes().await?;
            tokio::fs::write(&image_path, &body).await?;
        }
        image_paths.push(image_path);
    }
    Ok(image_paths)
}
