//! # edmliveset
//!
//! A Rust crate for browsing, searching and resolving the catalog of
//! [EDM Liveset](https://www.edmliveset.com) through web scraping.
//!
//! The site only exposes HTML pages: category listings rendered as a post
//! grid, search results rendered as articles, and one page per liveset. This
//! crate turns them into typed records and exposes listings and searches as
//! exact `(offset, limit)` windows, independent of how the site paginates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edmliveset::{LiveSetClient, LiveSetClientImpl, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let http_client = http_client::native::NativeClient::new();
//!     let client = LiveSetClientImpl::new(Box::new(http_client));
//!
//!     let results = client.search_range("armin van buuren", 0, 10).await?;
//!     println!("{} of ~{} results", results.items.len(), results.total);
//!
//!     for section in client.browse_sections(0, 2).await? {
//!         println!("{}: {} tracks", section.title, section.items.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```rust,no_run
//! use edmliveset::{AsyncPaginatedIterator, LiveSetClientImpl, Result};
//!
//! # tokio_test::block_on(async {
//! let client = LiveSetClientImpl::new(Box::new(http_client::native::NativeClient::new()));
//! let mut tracks = client.listing_tracks("/classic-livesets/");
//! while let Some(track) = tracks.next().await? {
//!     println!("{track}");
//! }
//! # Ok::<(), edmliveset::LiveSetError>(())
//! # });
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod extract;
pub mod headers;
pub mod iterator;
pub mod parsing;
pub mod range;
pub mod sections;
pub mod r#trait;
pub mod types;
pub mod urls;

pub use cache::DetailCache;
pub use client::LiveSetClientImpl;
pub use error::LiveSetError;
pub use iterator::{AsyncPaginatedIterator, CatalogIterator};
pub use parsing::LiveSetParser;
pub use r#trait::LiveSetClient;
pub use sections::{find_section, Section, SECTIONS};
pub use types::{
    ArtistRef, BrowseSection, ClientConfig, ClientEvent, ClientEventReceiver, ClientEventWatcher,
    RangeResult, RequestInfo, SharedEventBroadcaster, TrackDetail, TrackPage, TrackSummary,
};

#[cfg(feature = "mock")]
pub use r#trait::MockLiveSetClient;

// Re-export scraper types for testing
pub use scraper::Html;

pub type Result<T> = std::result::Result<T, LiveSetError>;
