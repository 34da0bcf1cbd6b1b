#![allow(dead_code)]
use edmliveset::{ClientConfig, LiveSetClientImpl};
use http_client::{Error, HttpClient, Request, Response};
use http_types::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE: &str = "https://www.edmliveset.com";

pub const LISTING_PAGE_1: &str = include_str!("../fixtures/listing_page_1.html");
pub const LISTING_PAGE_2: &str = include_str!("../fixtures/listing_page_2.html");
pub const CLASSIC_LIVESETS: &str = include_str!("../fixtures/classic_livesets.html");
pub const SEARCH_PAGE_1: &str = include_str!("../fixtures/search_page_1.html");
pub const SEARCH_PAGE_2: &str = include_str!("../fixtures/search_page_2.html");
pub const SEARCH_EMPTY: &str = include_str!("../fixtures/search_empty.html");
pub const TRACK_ASOT_1000: &str = include_str!("../fixtures/track_asot_1000.html");
pub const TRACK_GARRIX_ULTRA: &str = include_str!("../fixtures/track_garrix_ultra.html");

#[derive(Debug, Clone)]
enum Fixture {
    Page(String),
    Status(u16),
    Redirect(String),
}

/// In-memory HTTP client serving canned responses by full URL.
///
/// Unknown URLs answer 404. Every request is recorded so tests can assert on
/// how many fetches an operation made; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct FixtureClient {
    fixtures: HashMap<String, Fixture>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` with status 200 at `url`
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.fixtures
            .insert(url.to_string(), Fixture::Page(html.to_string()));
        self
    }

    /// Answer `url` with an empty body and `status`
    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.fixtures.insert(url.to_string(), Fixture::Status(status));
        self
    }

    /// Answer `url` with a 301 to `location`
    pub fn redirect(mut self, url: &str, location: &str) -> Self {
        self.fixtures
            .insert(url.to_string(), Fixture::Redirect(location.to_string()));
        self
    }

    /// All requested URLs, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made for `url`
    pub fn hits(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait::async_trait]
impl HttpClient for FixtureClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let url = req.url().to_string();
        self.requests.lock().unwrap().push(url.clone());

        let response = match self.fixtures.get(&url) {
            Some(Fixture::Page(html)) => {
                let mut response = Response::new(StatusCode::Ok);
                response.insert_header("Content-Type", "text/html; charset=UTF-8");
                response.set_body(html.clone());
                response
            }
            Some(Fixture::Status(status)) => {
                let status = StatusCode::try_from(*status).unwrap_or(StatusCode::InternalServerError);
                Response::new(status)
            }
            Some(Fixture::Redirect(location)) => {
                let mut response = Response::new(StatusCode::MovedPermanently);
                response.insert_header("Location", location.as_str());
                response
            }
            None => Response::new(StatusCode::NotFound),
        };
        Ok(response)
    }
}

/// Fixture client serving the whole recorded catalog
pub fn catalog_fixtures() -> FixtureClient {
    FixtureClient::new()
        .page(&format!("{BASE}/livesets-dj-mixes/"), LISTING_PAGE_1)
        .page(&format!("{BASE}/livesets-dj-mixes/page/2/"), LISTING_PAGE_2)
        .page(&format!("{BASE}/classic-livesets/"), CLASSIC_LIVESETS)
        .page(&format!("{BASE}/?s=armin&post_type=post"), SEARCH_PAGE_1)
        .page(&format!("{BASE}/page/2/?s=armin&post_type=post"), SEARCH_PAGE_2)
        .page(&format!("{BASE}/?s=zzzz&post_type=post"), SEARCH_EMPTY)
        .page(&format!("{BASE}/armin-van-buuren-asot-1000/"), TRACK_ASOT_1000)
        .page(&format!("{BASE}/martin-garrix-ultra-2024/"), TRACK_GARRIX_ULTRA)
}

/// Client over `fixtures` with the default configuration
pub fn create_test_client(fixtures: &FixtureClient) -> LiveSetClientImpl {
    LiveSetClientImpl::with_config(Box::new(fixtures.clone()), ClientConfig::new())
}
