use crate::r#trait::LiveSetClient;
use crate::types::TrackSummary;
use crate::Result;

use async_trait::async_trait;

/// Items requested per range when streaming a listing or search.
pub const DEFAULT_BATCH_SIZE: usize = 24;

/// Async iterator trait for paginated catalog data.
///
/// This trait provides a common interface for streaming listings and search
/// results without dealing with offsets or the site's page numbering.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method automatically handles pagination, fetching new batches as needed.
    /// Returns `None` when there are no more items available.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network error occurred
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    ///
    /// **Warning**: This method will fetch ALL remaining batches, which for the
    /// main listing means thousands of items. Use [`take`](Self::take) for
    /// safer bounded collection.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of batches fetched so far.
    fn current_page(&self) -> u32;

    /// Get the total number of batches, if known.
    ///
    /// This information is not available until at least one batch has been fetched.
    fn total_pages(&self) -> Option<u32> {
        None
    }
}

enum CatalogSource {
    Listing(String),
    Search(String),
}

/// Iterator over a category listing or the results of a search.
///
/// Items are fetched in ranges of `batch_size` starting at an offset, so every
/// item of the underlying listing is yielded exactly once regardless of how
/// the site splits it into pages.
pub struct CatalogIterator<C: LiveSetClient> {
    client: C,
    source: CatalogSource,
    batch_size: usize,
    offset: usize,
    batches: u32,
    total: Option<usize>,
    has_more: bool,
    buffer: Vec<TrackSummary>,
}

#[async_trait(?Send)]
impl<C: LiveSetClient> AsyncPaginatedIterator<TrackSummary> for CatalogIterator<C> {
    async fn next(&mut self) -> Result<Option<TrackSummary>> {
        if self.buffer.is_empty() {
            if !self.has_more {
                return Ok(None);
            }

            let range = match &self.source {
                CatalogSource::Listing(path) => {
                    self.client
                        .listing_range(path, self.offset, self.batch_size)
                        .await?
                }
                CatalogSource::Search(query) => {
                    self.client
                        .search_range(query, self.offset, self.batch_size)
                        .await?
                }
            };
            self.batches += 1;
            self.total = Some(range.total);

            if range.items.is_empty() {
                self.has_more = false;
                return Ok(None);
            }

            log::trace!(
                "Batch {} yielded {} items at offset {}",
                self.batches,
                range.items.len(),
                self.offset
            );

            self.offset += range.items.len();
            self.has_more = range.has_more;
            self.buffer = range.items;
            self.buffer.reverse(); // Reverse so we can pop from end efficiently
        }

        Ok(self.buffer.pop())
    }

    fn current_page(&self) -> u32 {
        self.batches
    }

    fn total_pages(&self) -> Option<u32> {
        self.total
            .map(|total| total.div_ceil(self.batch_size) as u32)
    }
}

impl<C: LiveSetClient> CatalogIterator<C> {
    /// Iterate over a category listing such as `/classic-livesets/`.
    pub fn listing(client: C, path: &str) -> Self {
        Self::new(client, CatalogSource::Listing(path.to_string()))
    }

    /// Iterate over the search results for `query`.
    pub fn search(client: C, query: &str) -> Self {
        Self::new(client, CatalogSource::Search(query.to_string()))
    }

    fn new(client: C, source: CatalogSource) -> Self {
        Self {
            client,
            source,
            batch_size: DEFAULT_BATCH_SIZE,
            offset: 0,
            batches: 0,
            total: None,
            has_more: true,
            buffer: Vec::new(),
        }
    }

    /// Start at `offset` instead of the first item.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Request `batch_size` items per range (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Offset of the next item to be fetched from the site.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
