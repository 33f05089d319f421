//! Infinite-scroll cursor over the public property listing.

use crate::api::{PagedResult, PropertiesApi, Property, PropertySearch};
use crate::error::Result;

/// Page size used by the public listing.
pub const FEED_PAGE_SIZE: u32 = 10;

/// Filters from the listing's search panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilters {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl PropertyFilters {
    fn search(&self, page: u32) -> PropertySearch {
        PropertySearch {
            name: self.name.clone(),
            address: self.address.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            page,
            page_size: FEED_PAGE_SIZE,
        }
    }
}

/// Loaded pages for one set of filters.
///
/// Pages are fetched one at a time with [`load_next`](Self::load_next)
/// until the last page reports `page >= totalPages`.
#[derive(Debug, Clone)]
pub struct PropertyFeed {
    api: PropertiesApi,
    filters: PropertyFilters,
    pages: Vec<PagedResult<Property>>,
}

impl PropertyFeed {
    pub fn new(api: PropertiesApi, filters: PropertyFilters) -> Self {
        Self {
            api,
            filters,
            pages: Vec::new(),
        }
    }

    pub fn filters(&self) -> &PropertyFilters {
        &self.filters
    }

    /// Replace the filters. Loaded pages are discarded if they changed.
    pub fn set_filters(&mut self, filters: PropertyFilters) {
        if filters != self.filters {
            self.filters = filters;
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.pages.clear();
    }

    /// Page to request next; `None` once the listing is exhausted.
    pub fn next_page(&self) -> Option<u32> {
        match self.pages.last() {
            None => Some(1),
            Some(last) => last.next_page(),
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page().is_some()
    }

    /// Fetch the next page. Returns the number of new properties, or `None`
    /// when there was nothing left to load.
    pub async fn load_next(&mut self) -> Result<Option<usize>> {
        let Some(page) = self.next_page() else {
            return Ok(None);
        };
        let result = self.api.search(&self.filters.search(page)).await?;
        tracing::debug!(
            page,
            total_pages = result.total_pages,
            loaded = result.data.len(),
            "Property page loaded"
        );
        let loaded = result.data.len();
        self.accept(result);
        Ok(Some(loaded))
    }

    /// Load every remaining page.
    pub async fn load_all(&mut self) -> Result<usize> {
        let mut total = 0;
        while let Some(loaded) = self.load_next().await? {
            total += loaded;
        }
        Ok(total)
    }

    /// All loaded properties, in page order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.pages.iter().flat_map(|page| page.data.iter())
    }

    /// Total reported by the first page, `0` before anything is loaded.
    pub fn total_count(&self) -> u64 {
        self.pages.first().map(|p| p.total_count).unwrap_or(0)
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages.len()
    }

    fn accept(&mut self, page: PagedResult<Property>) {
        self.pages.push(page);
    }
}
