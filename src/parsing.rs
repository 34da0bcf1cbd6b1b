//! HTML parsing for EDM Liveset pages.
//!
//! This module contains the parsing logic for the three page layouts the site
//! renders: the category listing grid, the search results, and the track page.
//! Parsing never fails. A missing container yields an empty page, a missing
//! field yields its documented default, and malformed grid entries are skipped.

use crate::extract::{
    ensure_artists, extract_duration_ms, guess_artists_from_title, normalize_artist, parse_date,
};
use crate::types::{TrackDetail, TrackPage, TrackSummary, DEFAULT_PAGE_SIZE, UNKNOWN_TITLE};
use crate::urls::{normalize_url, track_id_from_url};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Where the audio stream of a track page may be found, in order of preference.
const AUDIO_SOURCES: [(&str, &str); 3] = [
    ("audio source", "src"),
    ("audio a", "href"),
    ("a[href*='hearthis.at'][href*='listen']", "href"),
];

/// Title elements of a track page, in order of preference.
const TITLE_SOURCES: [&str; 2] = ["h1", ".entry-title"];

/// Parser for EDM Liveset HTML pages.
///
/// Holds the origin that relative links are resolved against and the page size
/// reported for pages that do not reveal their own.
#[derive(Debug, Clone)]
pub struct LiveSetParser {
    base_url: String,
    default_page_size: usize,
}

impl LiveSetParser {
    /// Create a new parser resolving links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page size reported when a page does not reveal its own.
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    // --------------------------------------------------------------------------------------------
    // Listing grid
    // --------------------------------------------------------------------------------------------

    /// Parse a category listing page (the post grid layout).
    pub fn parse_listing_page(&self, document: &Html, page_number: u32) -> TrackPage {
        let grid_selector = Selector::parse(".uc_post_grid_style_one").unwrap();
        let Some(grid) = document.select(&grid_selector).next() else {
            log::debug!("No listing grid found on page {page_number}");
            return TrackPage::empty(page_number, self.default_page_size);
        };

        let query_data = grid.value().attr("querydata").and_then(parse_query_data);
        let reported_total = query_data
            .as_ref()
            .and_then(|data| count_field(data, "total_posts"));
        let reported_page_size = query_data
            .as_ref()
            .and_then(|data| count_field(data, "count_posts"));

        let item_selector = Selector::parse(".ue_post_grid_item").unwrap();
        let tracks: Vec<TrackSummary> = grid
            .select(&item_selector)
            .filter_map(|item| self.parse_listing_item(&item))
            .collect();

        let page_size = reported_page_size.unwrap_or(tracks.len());
        let total_items = reported_total.unwrap_or_else(|| {
            page_number.saturating_sub(1) as usize * page_size + tracks.len()
        });

        log::debug!(
            "Parsed {} listing items on page {page_number} (page size {page_size}, total {total_items})",
            tracks.len()
        );

        TrackPage {
            tracks,
            page_number,
            page_size,
            total_items,
        }
    }

    /// Parse a single grid item, or `None` when it lacks a link or a title.
    fn parse_listing_item(&self, item: &ElementRef) -> Option<TrackSummary> {
        let title_selector = Selector::parse(".uc_post_title").unwrap();
        let link_selector = Selector::parse(".uc_post_grid_style_one_image").unwrap();
        let image_selector = Selector::parse(".uc_post_image img").unwrap();

        let href = item
            .select(&link_selector)
            .find_map(|link| non_empty_attr(&link, "href"));
        let title = item.select(&title_selector).next().and_then(|t| non_empty_text(&t));

        let (Some(href), Some(title)) = (href, title) else {
            log::trace!("Skipping grid item without link or title");
            return None;
        };

        let image = item
            .select(&image_selector)
            .find_map(|img| non_empty_attr(&img, "src"));

        Some(self.build_summary(&href, title, image, None))
    }

    // --------------------------------------------------------------------------------------------
    // Search results
    // --------------------------------------------------------------------------------------------

    /// Parse a search results page.
    ///
    /// The layout exposes no item count, so the total is estimated as the
    /// load-more control's maximum page times the number of items on this page.
    /// That estimate is only an approximation.
    pub fn parse_search_page(&self, document: &Html, page_number: u32) -> TrackPage {
        let container_selector = Selector::parse(".elementor-posts-container").unwrap();
        let Some(container) = document.select(&container_selector).next() else {
            log::debug!("No search results container found on page {page_number}");
            return TrackPage::empty(page_number, self.default_page_size);
        };

        let article_selector = Selector::parse("article").unwrap();
        let tracks: Vec<TrackSummary> = container
            .select(&article_selector)
            .filter_map(|article| self.parse_search_article(&article))
            .collect();

        let page_size = if tracks.is_empty() {
            self.default_page_size
        } else {
            tracks.len()
        };

        let anchor_selector = Selector::parse(".e-load-more-anchor").unwrap();
        let total_pages = document
            .select(&anchor_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("data-max-page"))
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|&pages| pages > 0)
            .unwrap_or_else(|| page_number.max(1));

        let total_items = total_pages as usize * page_size;

        log::debug!(
            "Parsed {} search results on page {page_number} ({total_pages} pages, ~{total_items} items)",
            tracks.len()
        );

        TrackPage {
            tracks,
            page_number,
            page_size,
            total_items,
        }
    }

    /// Parse a single search result article.
    fn parse_search_article(&self, article: &ElementRef) -> Option<TrackSummary> {
        let thumbnail_link_selector = Selector::parse(".elementor-post__thumbnail__link").unwrap();
        let title_link_selector = Selector::parse(".elementor-post__title a").unwrap();
        let title_selector = Selector::parse(".elementor-post__title").unwrap();
        let image_selector = Selector::parse(".elementor-post__thumbnail img").unwrap();
        let date_selector = Selector::parse(".elementor-post-date").unwrap();

        let href = [&thumbnail_link_selector, &title_link_selector]
            .into_iter()
            .find_map(|selector| {
                article
                    .select(selector)
                    .find_map(|link| non_empty_attr(&link, "href"))
            });
        let title = article
            .select(&title_selector)
            .next()
            .and_then(|t| non_empty_text(&t));

        let (Some(href), Some(title)) = (href, title) else {
            log::trace!("Skipping search article without link or title");
            return None;
        };

        let image = article
            .select(&image_selector)
            .find_map(|img| non_empty_attr(&img, "src"));
        let added_date = article
            .select(&date_selector)
            .next()
            .and_then(|date| parse_date(&element_text(&date)));

        Some(self.build_summary(&href, title, image, added_date))
    }

    fn build_summary(
        &self,
        href: &str,
        title: String,
        image: Option<String>,
        added_date: Option<String>,
    ) -> TrackSummary {
        let url = normalize_url(href, &self.base_url);
        TrackSummary {
            id: track_id_from_url(&url),
            artists: guess_artists_from_title(&title),
            title,
            url,
            image: image.map(|src| normalize_url(&src, &self.base_url)),
            added_date,
        }
    }

    // --------------------------------------------------------------------------------------------
    // Track page
    // --------------------------------------------------------------------------------------------

    /// Parse a track page fetched from `url` into its full detail record.
    pub fn parse_track_detail(&self, document: &Html, url: &str) -> TrackDetail {
        let image_selector =
            Selector::parse(".elementor-widget-theme-post-featured-image img").unwrap();
        let info_selector =
            Selector::parse(".elementor-post-info li.elementor-icon-list-item").unwrap();

        let image = document
            .select(&image_selector)
            .find_map(|img| non_empty_attr(&img, "src"))
            .map(|src| normalize_url(&src, &self.base_url));

        let title = TITLE_SOURCES
            .iter()
            .find_map(|css| {
                let selector = Selector::parse(css).unwrap();
                document
                    .select(&selector)
                    .find_map(|heading| non_empty_text(&heading))
            })
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let info_items: Vec<ElementRef> = document.select(&info_selector).collect();
        log::trace!("Found {} info list items", info_items.len());

        let artists = match extract_info_values(&info_items, "artist:") {
            Some(values) if !values.is_empty() => ensure_artists(values),
            _ => guess_artists_from_title(&title),
        };
        let genres = extract_info_values(&info_items, "genre:")
            .unwrap_or_default()
            .into_iter()
            .map(|genre| normalize_artist(&genre))
            .filter(|genre| !genre.is_empty())
            .collect();
        let event = extract_info_values(&info_items, "event:")
            .and_then(|values| values.into_iter().next());
        let added_date = extract_date_value(&info_items, "added:");

        let audio_url = self.extract_audio_url(document);
        let duration_ms = extract_content_duration(document);

        log::debug!(
            "Parsed track '{title}': audio={}, duration={duration_ms}ms",
            audio_url.is_some()
        );

        TrackDetail {
            summary: TrackSummary {
                id: track_id_from_url(url),
                title,
                url: url.to_string(),
                image,
                artists,
                added_date,
            },
            genres,
            event,
            audio_url,
            duration_ms,
        }
    }

    /// Find the audio stream URL of a track page.
    fn extract_audio_url(&self, document: &Html) -> Option<String> {
        AUDIO_SOURCES
            .iter()
            .find_map(|(css, attr)| {
                let selector = Selector::parse(css).unwrap();
                document
                    .select(&selector)
                    .find_map(|element| non_empty_attr(&element, attr))
            })
            .map(|src| normalize_url(&src, &self.base_url))
    }
}

impl Default for LiveSetParser {
    fn default() -> Self {
        Self::new(crate::types::BASE_URL)
    }
}

/// Decode the grid's embedded `querydata` attribute into untyped JSON.
fn parse_query_data(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    let decoded = raw.replace("&quot;", "\"").replace("&amp;", "&");
    match serde_json::from_str(&decoded) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring malformed querydata attribute: {e}");
            None
        }
    }
}

/// A positive count stored as a number or numeric string under `key`.
fn count_field(data: &Value, key: &str) -> Option<usize> {
    let value = data.get(key)?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .map(|count| count as usize)
        .filter(|&count| count > 0)
}

/// Values of the first info list item whose label starts with `label`.
///
/// Linked values (artists, genres) come back as their link texts; plain values
/// are the item text with everything up to the first colon removed.
fn extract_info_values(items: &[ElementRef], label: &str) -> Option<Vec<String>> {
    let link_selector = Selector::parse("a").unwrap();
    let value_selector = Selector::parse(".elementor-post-info__item").unwrap();

    for item in items.iter().filter(|item| has_label(item, label)) {
        let links: Vec<ElementRef> = item.select(&link_selector).collect();
        if !links.is_empty() {
            return Some(
                links
                    .iter()
                    .filter_map(|link| non_empty_text(link))
                    .collect(),
            );
        }

        let text = item
            .select(&value_selector)
            .next()
            .map(|value| element_text(&value))
            .unwrap_or_else(|| element_text(item));
        let value = strip_label(&text);
        if !value.is_empty() {
            return Some(vec![value.to_string()]);
        }
    }
    None
}

/// The date of the info item labelled `label`, from its value or its `<time>`.
fn extract_date_value(items: &[ElementRef], label: &str) -> Option<String> {
    let time_selector = Selector::parse("time").unwrap();

    let from_value = extract_info_values(items, label)
        .and_then(|values| values.into_iter().next())
        .and_then(|value| parse_date(&value));

    from_value.or_else(|| {
        items
            .iter()
            .filter(|item| has_label(item, label))
            .flat_map(|item| item.select(&time_selector))
            .find_map(|time| {
                parse_date(&element_text(&time))
                    .or_else(|| time.value().attr("datetime").and_then(parse_date))
            })
    })
}

/// Whether an info item's label (its prefix element, else its text) starts
/// with `label`, ignoring case.
fn has_label(item: &ElementRef, label: &str) -> bool {
    let prefix_selector = Selector::parse(".elementor-post-info__item-prefix").unwrap();
    let text = item
        .select(&prefix_selector)
        .next()
        .map(|prefix| element_text(&prefix))
        .unwrap_or_else(|| element_text(item));
    text.trim()
        .to_lowercase()
        .starts_with(&label.to_lowercase())
}

/// Remove everything up to and including the first colon.
fn strip_label(text: &str) -> &str {
    text.split_once(':').map_or(text, |(_, rest)| rest).trim()
}

/// Duration from the timestamp markers in the post content.
fn extract_content_duration(document: &Html) -> u64 {
    let content_selector = Selector::parse(".elementor-widget-theme-post-content").unwrap();
    document
        .select(&content_selector)
        .next()
        .map(|content| extract_duration_ms(&content.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or(0)
}

/// Whitespace-collapsed text content of an element.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty_text(element: &ElementRef) -> Option<String> {
    Some(element_text(element)).filter(|text| !text.is_empty())
}

fn non_empty_attr(element: &ElementRef, attr: &str) -> Option<String> {
    element
        .value()
        .attr(attr)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
