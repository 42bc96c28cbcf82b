/// One entry of a collection listing page.
#[derive(Debug, Clone)]
pub struct CollectEntry {
    /// Grid-size cover thumbnail, as served in the listing.
    pub thumbnail_url: String,
    /// Year of the date the user marked the entry.
    pub marked_year: i32,
}

/// One fetched page of a user's collection listing.
#[derive(Debug, Clone, Default)]
pub struct CollectPage {
    pub entries: Vec<CollectEntry>,
}
