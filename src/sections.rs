use crate::urls::normalize_url;
use crate::{LiveSetError, Result};

/// Number of tracks shown for each section when browsing.
pub const SECTION_PREVIEW_SIZE: usize = 12;

/// A browsable category of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    /// Listing path, with trailing slash
    pub path: &'static str,
}

impl Section {
    /// Absolute URL of the section's first listing page.
    pub fn external_url(&self, base_url: &str) -> String {
        normalize_url(self.path, base_url)
    }
}

/// All browse sections, in display order. The first one is the default
/// listing used for radio.
pub const SECTIONS: [Section; 2] = [
    Section {
        id: "livesets-dj-mixes",
        title: "Latest Livesets & DJ Mixes",
        path: "/livesets-dj-mixes/",
    },
    Section {
        id: "classic-livesets",
        title: "Classic Livesets",
        path: "/classic-livesets/",
    },
];

/// The section radio suggestions are drawn from.
pub const DEFAULT_SECTION: Section = SECTIONS[0];

/// Look up a section by identifier.
pub fn find_section(id: &str) -> Result<&'static Section> {
    SECTIONS
        .iter()
        .find(|section| section.id == id)
        .ok_or_else(|| LiveSetError::UnknownSection(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BASE_URL;

    #[test]
    fn test_find_section() {
        let section = find_section("classic-livesets").unwrap();
        assert_eq!(section.title, "Classic Livesets");
        assert_eq!(
            section.external_url(BASE_URL),
            "https://www.edmliveset.com/classic-livesets/"
        );
    }

    #[test]
    fn test_unknown_section_names_the_id() {
        let err = find_section("trance-classics").unwrap_err();
        assert!(matches!(err, LiveSetError::UnknownSection(ref id) if id == "trance-classics"));
        assert_eq!(err.to_string(), "Unknown browse section: trance-classics");
    }
}
