use crate::sections::{find_section, DEFAULT_SECTION, SECTIONS, SECTION_PREVIEW_SIZE};
use crate::types::{BrowseSection, RangeResult, TrackDetail, TrackPage, TrackSummary};
use crate::Result;
use async_trait::async_trait;

/// Trait for EDM Liveset catalog operations that can be mocked for testing.
///
/// The page and range methods are the primitives an implementation provides;
/// sections, browsing and radio are built on top of them.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLiveSetClient`
/// that implements this trait using the `mockall` library.
///
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LiveSetClient {
    /// Origin that section and track URLs are resolved against.
    fn base_url(&self) -> String;

    /// Fetch and parse one page of a category listing.
    async fn get_listing_page(&self, path: &str, page: u32) -> Result<TrackPage>;

    /// Fetch and parse one page of search results.
    async fn get_search_page(&self, query: &str, page: u32) -> Result<TrackPage>;

    /// Collect an exact `(offset, limit)` window of a category listing.
    async fn listing_range(&self, path: &str, offset: usize, limit: usize)
        -> Result<RangeResult>;

    /// Collect an exact `(offset, limit)` window of search results.
    async fn search_range(&self, query: &str, offset: usize, limit: usize)
        -> Result<RangeResult>;

    /// Resolve a track identifier or URL to its full detail.
    async fn get_track(&self, id_or_url: &str) -> Result<TrackDetail>;

    /// Collect a window of one browse section's tracks.
    async fn section_range(
        &self,
        section_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<RangeResult> {
        let section = find_section(section_id)?;
        log::debug!("Loading section '{}' ({offset}+{limit})", section.id);
        self.listing_range(section.path, offset, limit).await
    }

    /// Browse sections `offset..offset + limit`, each with its first tracks.
    ///
    /// Sections are fetched concurrently; any failure fails the whole call.
    async fn browse_sections(&self, offset: usize, limit: usize) -> Result<Vec<BrowseSection>> {
        let sections: Vec<_> = SECTIONS.iter().skip(offset).take(limit).collect();
        let ranges = futures::future::try_join_all(
            sections
                .iter()
                .map(|section| self.listing_range(section.path, 0, SECTION_PREVIEW_SIZE)),
        )
        .await?;

        let base_url = self.base_url();
        Ok(sections
            .into_iter()
            .zip(ranges)
            .map(|(section, range)| BrowseSection {
                id: section.id.to_string(),
                title: section.title.to_string(),
                external_url: section.external_url(&base_url),
                browse_more: range.has_more,
                items: range.items,
            })
            .collect())
    }

    /// Up to `limit` latest tracks to play after the given one, excluding it.
    async fn radio(&self, id_or_url: &str, limit: usize) -> Result<Vec<TrackSummary>> {
        let (seed, range) = futures::try_join!(
            self.get_track(id_or_url),
            self.listing_range(DEFAULT_SECTION.path, 0, limit.saturating_add(1))
        )?;

        Ok(range
            .items
            .into_iter()
            .filter(|item| item.id != seed.id())
            .take(limit)
            .collect())
    }
}
