use crate::cache::DetailCache;
use crate::headers::add_get_headers;
use crate::iterator::{AsyncPaginatedIterator, CatalogIterator};
use crate::parsing::LiveSetParser;
use crate::r#trait::LiveSetClient;
use crate::range::collect_range;
use crate::types::{
    ClientConfig, ClientEvent, ClientEventReceiver, ClientEventWatcher, RangeResult, RequestInfo,
    SharedEventBroadcaster, TrackDetail, TrackPage, TrackSummary,
};
use crate::urls::{listing_url, resolve_track_url, search_url, track_id_from_url};
use crate::{LiveSetError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use scraper::Html;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Redirects followed before a request is given up on.
const MAX_REDIRECTS: u32 = 5;

/// HTTP implementation of [`LiveSetClient`] scraping the EDM Liveset site.
///
/// Cloning is cheap and clones share the HTTP client, the detail cache and the
/// event broadcaster.
///
/// # Examples
///
/// ```rust,no_run
/// use edmliveset::{LiveSetClient, LiveSetClientImpl, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let client = LiveSetClientImpl::new(Box::new(http_client));
///
///     let range = client.listing_range("/livesets-dj-mixes/", 0, 20).await?;
///     for track in &range.items {
///         println!("{track}");
///     }
///
///     if let Some(first) = range.items.first() {
///         let detail = client.get_track(&first.id).await?;
///         println!("{detail}: {:?}", detail.audio_url);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LiveSetClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: ClientConfig,
    parser: LiveSetParser,
    cache: Arc<DetailCache>,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl LiveSetClientImpl {
    /// Create a client for the public site with default settings.
    pub fn new(client: Box<dyn HttpClient + Send + Sync>) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        let parser = LiveSetParser::new(config.base_url.clone())
            .with_default_page_size(config.default_page_size);
        Self {
            client: Arc::from(client),
            config,
            parser,
            cache: Arc::new(DetailCache::new()),
            broadcaster: Arc::new(SharedEventBroadcaster::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    pub fn watch_events(&self) -> ClientEventWatcher {
        self.broadcaster.watch()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.broadcaster.latest_event()
    }

    /// Number of track details held in the cache.
    pub fn cached_tracks(&self) -> usize {
        self.cache.len()
    }

    /// Stream every track of a category listing.
    pub fn listing_tracks(&self, path: &str) -> Box<dyn AsyncPaginatedIterator<TrackSummary>> {
        Box::new(CatalogIterator::listing(self.clone(), path))
    }

    /// Stream every search result for `query`.
    pub fn search_tracks(&self, query: &str) -> Box<dyn AsyncPaginatedIterator<TrackSummary>> {
        Box::new(CatalogIterator::search(self.clone(), query))
    }

    /// GET `url` and return its body, following redirects.
    ///
    /// Any final status outside 2xx fails with [`LiveSetError::Fetch`].
    async fn fetch_body(&self, url: Url) -> Result<String> {
        let mut current = url;

        for redirect_count in 0..=MAX_REDIRECTS {
            let request_info = RequestInfo::from_url_and_method(&current, "GET");
            let request_start = Instant::now();
            log::debug!("{}", request_info.short_description());

            self.broadcaster.broadcast_event(ClientEvent::RequestStarted {
                request: request_info.clone(),
            });

            let mut request = Request::new(Method::Get, current.clone());
            add_get_headers(&mut request, &self.config.user_agent);

            let mut response = self
                .client
                .send(request)
                .await
                .map_err(|e| LiveSetError::Http(e.to_string()))?;
            let status_code: u16 = response.status().into();

            self.broadcaster.broadcast_event(ClientEvent::RequestCompleted {
                request: request_info,
                status_code,
                duration_ms: request_start.elapsed().as_millis() as u64,
            });

            if response.status().is_redirection() {
                let location = response
                    .header("location")
                    .map(|values| values.last().as_str().to_string());
                if let Some(location) = location {
                    let next = current.join(&location).map_err(|e| {
                        LiveSetError::InvalidUrl(format!("redirect to {location}: {e}"))
                    })?;
                    log::debug!(
                        "Following redirect {} from {current} to {next}",
                        redirect_count + 1
                    );
                    current = next;
                    continue;
                }
            }

            if !response.status().is_success() {
                log::warn!("GET {current} failed with status {status_code}");
                return Err(LiveSetError::Fetch {
                    url: current.to_string(),
                    status: status_code,
                });
            }

            let body = response
                .body_string()
                .await
                .map_err(|e| LiveSetError::Http(e.to_string()))?;

            if self.config.debug_save_responses {
                self.save_debug_response(current.as_str(), status_code, &body);
            }

            return Ok(body);
        }

        Err(LiveSetError::Http(format!("Too many redirects for {current}")))
    }

    /// Save response to debug directory (optional debug feature)
    fn save_debug_response(&self, url: &str, status_code: u16, body: &str) {
        if let Err(e) = self.try_save_debug_response(url, status_code, body) {
            log::warn!("Failed to save debug response: {e}");
        }
    }

    fn try_save_debug_response(&self, url: &str, status_code: u16, body: &str) -> Result<()> {
        let debug_dir = Path::new("debug_responses");
        fs::create_dir_all(debug_dir)?;

        let url_path = url.strip_prefix(&self.config.base_url).unwrap_or(url);
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let safe_path = url_path.replace(['/', '?', '&', '=', '%', '+', ':'], "_");

        let file_path = debug_dir.join(format!("{timestamp}_{safe_path}_status{status_code}.html"));
        fs::write(&file_path, body)?;

        log::debug!("Saved HTTP response to {file_path:?} (status: {status_code}, url: {url_path})");
        Ok(())
    }
}

#[async_trait(?Send)]
impl LiveSetClient for LiveSetClientImpl {
    fn base_url(&self) -> String {
        self.config.base_url.clone()
    }

    async fn get_listing_page(&self, path: &str, page: u32) -> Result<TrackPage> {
        let url = listing_url(&self.config.base_url, path, page)?;
        let body = self.fetch_body(url).await?;

        let document = Html::parse_document(&body);
        Ok(self.parser.parse_listing_page(&document, page))
    }

    async fn get_search_page(&self, query: &str, page: u32) -> Result<TrackPage> {
        let url = search_url(&self.config.base_url, query, page)?;
        let body = self.fetch_body(url).await?;

        let document = Html::parse_document(&body);
        Ok(self.parser.parse_search_page(&document, page))
    }

    async fn listing_range(&self, path: &str, offset: usize, limit: usize) -> Result<RangeResult> {
        log::debug!("Listing range {path} [{offset}+{limit}]");
        collect_range(
            |page| self.get_listing_page(path, page),
            offset,
            limit,
            self.config.default_page_size,
        )
        .await
    }

    async fn search_range(&self, query: &str, offset: usize, limit: usize) -> Result<RangeResult> {
        log::debug!("Search range '{query}' [{offset}+{limit}]");
        collect_range(
            |page| self.get_search_page(query, page),
            offset,
            limit,
            self.config.default_page_size,
        )
        .await
    }

    async fn get_track(&self, id_or_url: &str) -> Result<TrackDetail> {
        let url = resolve_track_url(id_or_url, &self.config.base_url);
        let track_id = track_id_from_url(&url);

        if let Some(detail) = self.cache.get(&track_id) {
            log::debug!("Detail cache hit for {track_id}");
            self.broadcaster
                .broadcast_event(ClientEvent::CacheHit { track_id });
            return Ok(detail);
        }

        let parsed = Url::parse(&url).map_err(|e| LiveSetError::InvalidUrl(format!("{url}: {e}")))?;
        let body = self.fetch_body(parsed).await?;

        let detail = {
            let document = Html::parse_document(&body);
            self.parser.parse_track_detail(&document, &url)
        };
        Ok(self.cache.insert(detail))
    }
}
