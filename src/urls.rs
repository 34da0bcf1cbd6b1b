//! URL building and track identifiers.
//!
//! Every track identifier is `"edmlive:"` followed by the path of the track's
//! canonical URL without its trailing slash. The same page therefore always
//! maps to the same identifier, with or without a trailing slash.

use crate::types::TRACK_ID_PREFIX;
use crate::{LiveSetError, Result};
use http_types::Url;

/// Resolve a possibly relative URL against `base_url`.
///
/// Returns the input unchanged when it cannot be resolved.
pub fn normalize_url(url: &str, base_url: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(url.trim()))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| url.to_string())
}

/// Derive the canonical track identifier from a track URL.
pub fn track_id_from_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let path = parsed.path();
            let path = path.strip_suffix('/').unwrap_or(path);
            if path.is_empty() {
                format!("{TRACK_ID_PREFIX}/")
            } else {
                format!("{TRACK_ID_PREFIX}{path}")
            }
        }
        Err(_) => format!("{TRACK_ID_PREFIX}{url}"),
    }
}

/// Turn an identifier or any absolute/relative URL into a canonical URL.
///
/// Identifiers carry their path without the trailing slash the site serves
/// pages under, so it is put back before resolving.
pub fn resolve_track_url(id_or_url: &str, base_url: &str) -> String {
    match id_or_url.strip_prefix(TRACK_ID_PREFIX) {
        Some(path) if path.ends_with('/') => normalize_url(path, base_url),
        Some(path) => normalize_url(&format!("{path}/"), base_url),
        None => normalize_url(id_or_url, base_url),
    }
}

fn join(base_url: &str, path: &str) -> Result<Url> {
    Url::parse(base_url)
        .and_then(|base| base.join(path))
        .map_err(|e| LiveSetError::InvalidUrl(format!("{base_url} + {path}: {e}")))
}

/// URL of page `page` of a listing path such as `/livesets-dj-mixes/`.
pub fn listing_url(base_url: &str, path: &str, page: u32) -> Result<Url> {
    let normalized = if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    };

    if page <= 1 {
        join(base_url, &normalized)
    } else {
        join(base_url, &format!("{normalized}page/{page}/"))
    }
}

/// URL of page `page` of the site search for `query`.
pub fn search_url(base_url: &str, query: &str, page: u32) -> Result<Url> {
    let path = if page > 1 {
        format!("/page/{page}/")
    } else {
        "/".to_string()
    };
    join(
        base_url,
        &format!("{path}?s={}&post_type=post", urlencoding::encode(query)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BASE_URL;

    #[test]
    fn test_track_id_ignores_trailing_slash() {
        let with_slash = track_id_from_url("https://www.edmliveset.com/afrojack-edc-2024/");
        let without = track_id_from_url("https://www.edmliveset.com/afrojack-edc-2024");
        assert_eq!(with_slash, "edmlive:/afrojack-edc-2024");
        assert_eq!(with_slash, without);
    }

    #[test]
    fn test_track_id_of_root_and_garbage() {
        assert_eq!(track_id_from_url("https://www.edmliveset.com"), "edmlive:/");
        assert_eq!(track_id_from_url("not a url"), "edmlive:not a url");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("/some-set/", BASE_URL),
            "https://www.edmliveset.com/some-set/"
        );
        assert_eq!(
            normalize_url("https://hearthis.at/x/listen/", BASE_URL),
            "https://hearthis.at/x/listen/"
        );
        assert_eq!(normalize_url("/x", "not a base"), "/x");
    }

    #[test]
    fn test_resolve_track_url_round_trips_identifier() {
        let url = "https://www.edmliveset.com/martin-garrix-ultra/";
        let id = track_id_from_url(url);
        let resolved = resolve_track_url(&id, BASE_URL);
        assert_eq!(resolved, url);
        assert_eq!(track_id_from_url(&resolved), id);
        assert_eq!(resolve_track_url("/martin-garrix-ultra/", BASE_URL), url);
    }

    #[test]
    fn test_listing_urls() {
        assert_eq!(
            listing_url(BASE_URL, "/classic-livesets", 1).unwrap().as_str(),
            "https://www.edmliveset.com/classic-livesets/"
        );
        assert_eq!(
            listing_url(BASE_URL, "/classic-livesets/", 3).unwrap().as_str(),
            "https://www.edmliveset.com/classic-livesets/page/3/"
        );
    }

    #[test]
    fn test_search_urls() {
        assert_eq!(
            search_url(BASE_URL, "armin van buuren", 1).unwrap().as_str(),
            "https://www.edmliveset.com/?s=armin%20van%20buuren&post_type=post"
        );
        assert_eq!(
            search_url(BASE_URL, "tiësto", 2).unwrap().as_str(),
            "https://www.edmliveset.com/page/2/?s=ti%C3%ABsto&post_type=post"
        );
    }
}
