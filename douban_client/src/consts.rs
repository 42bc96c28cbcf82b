pub const HOST: &str = "douban.com";

/// Number of entries per listing page; the `start` offset advances by this.
pub const PAGE_SIZE: u32 = 15;
