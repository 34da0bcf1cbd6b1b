//! Data types for the EDM Liveset catalog.
//!
//! This module contains the core data structures used throughout the crate:
//! track summaries and details, page and range results, client configuration,
//! and event handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::{broadcast, watch};

/// Origin of the EDM Liveset site
pub const BASE_URL: &str = "https://www.edmliveset.com";

/// Prefix of every track identifier produced by this crate
pub const TRACK_ID_PREFIX: &str = "edmlive:";

/// Initial page size estimate used before the site reports a real one
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Artist name used when no artist can be recovered from a page
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Title used when a track page has no recognisable heading
pub const UNKNOWN_TITLE: &str = "Unknown Liveset";

// ================================================================================================
// TRACK METADATA
// ================================================================================================

/// Summary of a liveset as it appears in a listing grid or search results.
///
/// # Examples
///
/// ```rust
/// use edmliveset::TrackSummary;
///
/// let track = TrackSummary {
///     id: "edmlive:/armin-van-buuren-asot-1000".to_string(),
///     title: "Armin van Buuren - ASOT 1000".to_string(),
///     url: "https://www.edmliveset.com/armin-van-buuren-asot-1000/".to_string(),
///     image: None,
///     artists: vec!["Armin van Buuren".to_string()],
///     added_date: Some("2024-03-21".to_string()),
/// };
///
/// println!("{track}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Identifier derived from the canonical URL path
    pub id: String,
    /// The liveset title as rendered by the site
    pub title: String,
    /// Canonical (absolute) URL of the track page
    pub url: String,
    /// Thumbnail or header image, if any
    pub image: Option<String>,
    /// Performing artists, never empty
    pub artists: Vec<String>,
    /// Date the liveset was added, as `YYYY-MM-DD`
    ///
    /// Only the search layout and the detail page expose this; listing grids
    /// leave it `None`.
    pub added_date: Option<String>,
}

/// Full metadata of a single liveset, parsed from its track page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackDetail {
    /// Fields shared with listing summaries
    #[serde(flatten)]
    pub summary: TrackSummary,
    /// Genres from the info list, possibly empty
    pub genres: Vec<String>,
    /// Event the set was recorded at
    pub event: Option<String>,
    /// Direct audio stream URL, if the page embeds one
    pub audio_url: Option<String>,
    /// Runtime in milliseconds, 0 when unknown
    pub duration_ms: u64,
}

/// Artist reference with a stable identifier derived from the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

impl TrackSummary {
    /// Artist references for every artist of this track.
    pub fn artist_refs(&self) -> Vec<ArtistRef> {
        self.artists
            .iter()
            .map(|name| crate::extract::artist_ref(name))
            .collect()
    }
}

impl TrackDetail {
    /// The identifier of this track.
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    /// The title of this track.
    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// Name to group this track under: the event when known, else the title.
    pub fn album_name(&self) -> &str {
        self.event.as_deref().unwrap_or(&self.summary.title)
    }
}

impl From<TrackDetail> for TrackSummary {
    fn from(detail: TrackDetail) -> Self {
        detail.summary
    }
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(date) = &self.added_date {
            write!(f, " ({date})")?;
        }
        Ok(())
    }
}

impl fmt::Display for TrackDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary.title)?;
        if let Some(event) = &self.event {
            write!(f, " [{event}]")?;
        }
        if self.duration_ms > 0 {
            write!(f, " ({})", format_duration(self.duration_ms))?;
        }
        Ok(())
    }
}

/// Format a millisecond duration as `H:MM:SS` or `M:SS`.
pub fn format_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

// ================================================================================================
// PAGES AND RANGES
// ================================================================================================

/// One fetched page of a listing or search.
///
/// `page_size` and `total_items` are best effort: the listing layout reports
/// both, the search layout only lets us infer them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPage {
    /// The tracks on this page
    pub tracks: Vec<TrackSummary>,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Number of items the site puts on a page
    pub page_size: usize,
    /// Reported or inferred total number of items
    pub total_items: usize,
}

impl TrackPage {
    /// A page that yielded nothing, used when the expected container is missing.
    pub fn empty(page_number: u32, page_size: usize) -> Self {
        Self {
            tracks: Vec::new(),
            page_number,
            page_size,
            total_items: 0,
        }
    }
}

/// A contiguous window of a listing or search, addressed by offset and limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeResult {
    /// At most `limit` items, fewer only when the source is exhausted
    pub items: Vec<TrackSummary>,
    /// Best current estimate of the total number of items
    pub total: usize,
    /// Offset to request next, `None` when exhausted
    pub next_offset: Option<usize>,
    /// Whether more items exist past this window
    pub has_more: bool,
}

impl RangeResult {
    /// A range with no items and nothing more to fetch.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            next_offset: None,
            has_more: false,
        }
    }
}

/// A browse section together with the first tracks it lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseSection {
    pub id: String,
    pub title: String,
    /// Absolute URL of the section page
    pub external_url: String,
    /// Whether the section has more tracks than `items`
    pub browse_more: bool,
    pub items: Vec<TrackSummary>,
}

// ================================================================================================
// CLIENT CONFIGURATION
// ================================================================================================

/// Configuration for the catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin every listing, search and track URL is resolved against
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Page size assumed before a page reports its own
    pub default_page_size: usize,
    /// Write every fetched body to `debug_responses/`
    pub debug_save_responses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: crate::headers::USER_AGENT.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            debug_save_responses: false,
        }
    }
}

impl ClientConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from the defaults overridden by environment variables.
    ///
    /// * `EDMLIVE_BASE_URL` replaces the origin
    /// * `EDMLIVE_DEBUG_SAVE_RESPONSES` (any value) enables response dumps
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("EDMLIVE_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().to_string();
            }
        }
        config.debug_save_responses = std::env::var("EDMLIVE_DEBUG_SAVE_RESPONSES").is_ok();
        config
    }

    /// Set a custom origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the initial page size estimate (0 is ignored)
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.default_page_size = page_size;
        }
        self
    }

    /// Enable/disable saving fetched bodies for debugging
    pub fn with_debug_save_responses(mut self, enabled: bool) -> Self {
        self.debug_save_responses = enabled;
        self
    }
}

// ================================================================================================
// EVENT SYSTEM
// ================================================================================================

/// Request information for client events
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method
    pub method: String,
    /// The full URI being requested
    pub uri: String,
    /// Query parameters as key-value pairs
    pub query_params: Vec<(String, String)>,
    /// Path without query parameters
    pub path: String,
}

impl RequestInfo {
    /// Create RequestInfo from a parsed URL and method
    pub fn from_url_and_method(url: &http_types::Url, method: &str) -> Self {
        Self {
            method: method.to_string(),
            uri: url.to_string(),
            query_params: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            path: url.path().to_string(),
        }
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        let mut desc = format!("{} {}", self.method, self.path);
        if !self.query_params.is_empty() {
            let params: Vec<String> = self
                .query_params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            if params.len() <= 2 {
                desc.push_str(&format!("?{}", params.join("&")));
            } else {
                desc.push_str(&format!("?{}...", params[0]));
            }
        }
        desc
    }
}

/// Event type to describe internal client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Request completed, successfully or not
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// A track detail was served from the cache without fetching
    CacheHit {
        /// Canonical identifier of the track
        track_id: String,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Type alias for the watch receiver
pub type ClientEventWatcher = watch::Receiver<Option<ClientEvent>>;

/// Shared event broadcasting state that persists across client clones
#[derive(Clone)]
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    /// Create a new shared event broadcaster
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    /// Watch the most recent event
    pub fn watch(&self) -> ClientEventWatcher {
        self.last_event_tx.subscribe()
    }

    /// Get the latest event
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

// ================================================================================================
// TESTS
// ================================================================================================
