use std::str::FromStr;

use tasklane_shared::PageMeta;

/// Page sizes the list view offers. A closed set, so an out-of-range limit
/// can never be composed into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageLimit {
    pub const ALL: [Self; 4] = [Self::Ten, Self::Twenty, Self::Fifty, Self::Hundred];

    pub fn as_u32(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::Twenty
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("page size must be one of 10, 20, 50, 100 (got {0})")]
pub struct InvalidPageLimit(String);

impl FromStr for PageLimit {
    type Err = InvalidPageLimit;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "10" => Ok(Self::Ten),
            "20" => Ok(Self::Twenty),
            "50" => Ok(Self::Fifty),
            "100" => Ok(Self::Hundred),
            other => Err(InvalidPageLimit(other.to_string())),
        }
    }
}

/// Current page and page size, plus the server-reported totals from the most
/// recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub limit: PageLimit,
    pub total: u64,
    pub pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PageLimit::default(),
            total: 0,
            pages: 1,
        }
    }
}

impl PageState {
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Request a page. The upper bound is enforced against the server's
    /// reported page count when the next result arrives, not here; a shell
    /// may legitimately request a page it has not seen yet.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Switching page size invalidates the old page index.
    pub fn set_limit(&mut self, limit: PageLimit) {
        if self.limit != limit {
            self.limit = limit;
            self.page = 1;
        }
    }

    /// Fold in the totals from a fresh result page, clamping `page` in case
    /// the result set shrank (e.g. after a delete). An empty result set may
    /// report zero pages; page 1 stays valid for it.
    pub fn apply_meta(&mut self, meta: &PageMeta) {
        self.total = meta.total;
        self.pages = meta.pages;
        self.page = self.page.clamp(1, meta.pages.max(1));
    }
}
