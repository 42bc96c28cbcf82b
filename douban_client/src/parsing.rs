use scraper::{ElementRef, Html};

use crate::error::{Error, Result};
use crate::result::*;
use crate::selectors;
use crate::Mode;

/// Parse one collection listing page into its entries, in document order.
/// A page with no matching entries parses to an empty `CollectPage`.
pub(crate) fn parse_collect_page(doc: &Html, mode: Mode) -> Result<CollectPage> {
    let entry_selector = match mode {
        Mode::Book => &*selectors::BOOK_ENTRY,
        Mode::Movie | Mode::Music => &*selectors::ITEM_ENTRY,
    };
    let entries = doc
        .select(entry_selector)
        .map(parse_entry)
        .collect::<Result<Vec<_>>>()?;
    Ok(CollectPage { entries })
}

fn parse_entry(e: ElementRef) -> Result<CollectEntry> {
    fn parse_thumbnail_url(e: ElementRef) -> Option<String> {
        Some(e.select(&selectors::THUMBNAIL_URL).next()?.value().attr("src")?.to_string())
    }

    // The date text may carry trailing status text ("2023-04-05 读过"),
    // only the leading year matters here.
    fn parse_marked_year(e: ElementRef) -> Option<i32> {
        let text = e.select(&selectors::MARKED_DATE).next()?.text().next()?.trim();
        text.split('-').next()?.parse::<i32>().ok()
    }

    Ok(CollectEntry {
        thumbnail_url: parse_thumbnail_url(e).ok_or(Error::InvalidHTML("thumbnail url".to_string()))?,
        marked_year: parse_marked_year(e).ok_or(Error::InvalidHTML("marked date".to_string()))?,
    })
}
