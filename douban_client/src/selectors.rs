use lazy_static::lazy_static;
use scraper::Selector;

lazy_static! {
    /// Book listings wrap entries in list items, the other modes in divs.
    pub static ref BOOK_ENTRY: Selector = Selector::parse("li.subject-item").unwrap();
    pub static ref ITEM_ENTRY: Selector = Selector::parse("div.item").unwrap();
    pub static ref THUMBNAIL_URL: Selector = Selector::parse("a.nbg > img").unwrap();
    pub static ref MARKED_DATE: Selector = Selector::parse("span.date").unwrap();
}
