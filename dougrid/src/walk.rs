use std::fmt::{Display, Formatter};
use std::future::Future;
use std::str::FromStr;

use douban_client::{CollectEntry, CollectPage, DoubanClient, Mode, PAGE_SIZE};

use crate::error::{Error, Result};

/// Restricts the walk to entries marked in one year, or keeps everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    All,
    Year(i32),
}

impl FromStr for YearFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(YearFilter::All);
        }
        // Digits only: a signed number is not a year.
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidYear(s.to_string()));
        }
        s.parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| Error::InvalidYear(s.to_string()))
    }
}

impl Display for YearFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YearFilter::All => write!(f, "all years"),
            YearFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Walk the whole collection listing and return the full-size image URLs of
/// every entry matching the filter, in listing order (newest first).
///
/// Precondition: the listing is ordered by marked date, newest first. The
/// walk stops at the first entry older than the target year, so if the site
/// ever served entries out of order the result would silently undercount.
pub async fn walk_collection(
    client: &DoubanClient,
    user_id: &str,
    mode: Mode,
    filter: YearFilter,
) -> Result<Vec<String>> {
    walk_pages(mode, filter, |offset| client.collect_page(user_id, mode, offset)).await
}

/// Drive the page source from offset 0 in steps of `PAGE_SIZE`, until a page
/// comes back empty or the filter reports an entry older than the target.
async fn walk_pages<F, Fut>(mode: Mode, filter: YearFilter, mut fetch_page: F) -> Result<Vec<String>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<CollectPage, douban_client::Error>>,
{
    let mut image_urls = Vec::new();
    let mut offset = 0;

    loop {
        tracing::info!("Processing collection page at offset {}", offset);
        let page = fetch_page(offset).await?;
        if page.entries.is_empty() {
            break;
        }

        let (kept, reached_end) = apply_year_filter(page.entries, filter);
        image_urls.extend(kept.iter().map(|e| mode.large_image_url(&e.thumbnail_url)));
        if reached_end {
            break;
        }

        offset += PAGE_SIZE;
    }

    Ok(image_urls)
}

/// Keep the entries matching the filter; the second value reports whether an
/// entry older than the target year was seen, which ends the whole walk.
/// Entries newer than the target year are skipped without ending it.
fn apply_year_filter(entries: Vec<CollectEntry>, filter: YearFilter) -> (Vec<CollectEntry>, bool) {
    let target = match filter {
        YearFilter::All => return (entries, false),
        YearFilter::Year(year) => year,
    };

    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.marked_year > target {
            continue;
        }
        if entry.marked_year < target {
            return (kept, true);
        }
        kept.push(entry);
    }
    (kept, false)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::VecDeque;

    fn entries(years: &[i32]) -> Vec<CollectEntry> {
        years
            .iter()
            .map(|&year| CollectEntry {
                thumbnail_url: format!("https://img1.doubanio.com/view/subject/s/public/s{}.jpg", year),
                marked_year: year,
            })
            .collect()
    }

    fn page(years: &[i32]) -> CollectPage {
        CollectPage { entries: entries(years) }
    }

    #[test]
    fn test_year_filter_from_str() {
        assert_eq!("all".parse::<YearFilter>().unwrap(), YearFilter::All);
        assert_eq!("2023".parse::<YearFilter>().unwrap(), YearFilter::Year(2023));
        assert!(matches!("202x".parse::<YearFilter>(), Err(Error::InvalidYear(_))));
    }

    #[test]
    fn test_year_filter_rejects_signed_numbers() {
        assert!(matches!("-5".parse::<YearFilter>(), Err(Error::InvalidYear(_))));
        assert!(matches!("+2023".parse::<YearFilter>(), Err(Error::InvalidYear(_))));
        assert!(matches!("".parse::<YearFilter>(), Err(Error::InvalidYear(_))));
    }

    #[test]
    fn test_filter_skips_newer_and_halts_on_older() {
        let (kept, reached_end) = apply_year_filter(entries(&[2024, 2023, 2023, 2022]), YearFilter::Year(2023));
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.marked_year == 2023));
        assert!(reached_end);
    }

    #[test]
    fn test_filter_keeps_full_matching_page() {
        let (kept, reached_end) = apply_year_filter(entries(&[2023, 2023]), YearFilter::Year(2023));
        assert_eq!(kept.len(), 2);
        assert!(!reached_end);
    }

    #[test]
    fn test_filter_halts_immediately_on_older_page() {
        let (kept, reached_end) = apply_year_filter(entries(&[2021, 2020]), YearFilter::Year(2023));
        assert!(kept.is_empty());
        assert!(reached_end);
    }

    #[test]
    fn test_all_disables_filtering() {
        let (kept, reached_end) = apply_year_filter(entries(&[2024, 2022, 2019]), YearFilter::All);
        assert_eq!(kept.len(), 3);
        assert!(!reached_end);
    }

    #[tokio::test]
    async fn test_walk_all_stops_only_on_empty_page() {
        let mut pages = VecDeque::from([page(&[2024, 2023]), page(&[2022]), page(&[])]);
        let mut offsets = Vec::new();
        let urls = walk_pages(Mode::Movie, YearFilter::All, |offset| {
            offsets.push(offset);
            std::future::ready(Ok(pages.pop_front().expect("walked past the empty page")))
        })
        .await
        .unwrap();

        assert_eq!(offsets, vec![0, PAGE_SIZE, 2 * PAGE_SIZE]);
        assert_eq!(urls.len(), 3);
        assert!(urls[0].contains("s2024"));
        assert!(urls[2].contains("s2022"));
    }

    #[tokio::test]
    async fn test_walk_halts_on_older_entry_without_fetching_more() {
        let mut pages = VecDeque::from([page(&[2024, 2023]), page(&[2023, 2022]), page(&[2021])]);
        let mut offsets = Vec::new();
        let urls = walk_pages(Mode::Book, YearFilter::Year(2023), |offset| {
            offsets.push(offset);
            std::future::ready(Ok(pages.pop_front().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(offsets, vec![0, PAGE_SIZE]);
        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|url| url.contains("subject/l")));
    }

    #[tokio::test]
    async fn test_walk_aborts_on_page_error() {
        let mut calls = 0;
        let result = walk_pages(Mode::Movie, YearFilter::All, |_| {
            calls += 1;
            std::future::ready(Err(douban_client::Error::InvalidHTML("thumbnail url".to_string())))
        })
        .await;

        assert!(matches!(result, Err(Error::Client(_))));
        assert_eq!(calls, 1);
    }
}
