#[cfg(feature = "mock")]
mod mock_tests {
    use edmliveset::{
        LiveSetClient, MockLiveSetClient, RangeResult, Result, TrackDetail, TrackPage,
        TrackSummary,
    };
    use mockall::predicate::*; // for eq(), any(), etc.

    fn summary(slug: &str) -> TrackSummary {
        TrackSummary {
            id: format!("edmlive:/{slug}"),
            title: format!("{slug} - Live"),
            url: format!("https://www.edmliveset.com/{slug}/"),
            image: None,
            artists: vec![slug.to_string()],
            added_date: None,
        }
    }

    #[tokio::test]
    async fn test_mock_get_track() -> Result<()> {
        let mut mock_client = MockLiveSetClient::new();

        let expected = TrackDetail {
            summary: summary("eric-prydz-holosphere"),
            genres: vec!["Progressive House".to_string()],
            event: Some("HOLOSPHERE".to_string()),
            audio_url: Some("https://hearthis.at/x/listen/".to_string()),
            duration_ms: 5_400_000,
        };

        let returned = expected.clone();
        mock_client
            .expect_get_track()
            .with(eq("edmlive:/eric-prydz-holosphere"))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        // Use the mock as a trait object
        let client: &dyn LiveSetClient = &mock_client;
        let detail = client.get_track("edmlive:/eric-prydz-holosphere").await?;

        assert_eq!(detail, expected);
        assert_eq!(detail.album_name(), "HOLOSPHERE");

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_listing_range() -> Result<()> {
        let mut mock_client = MockLiveSetClient::new();

        mock_client
            .expect_listing_range()
            .with(eq("/classic-livesets/"), eq(0), eq(2))
            .times(1)
            .returning(|_, _, _| {
                Ok(RangeResult {
                    items: vec![summary("a"), summary("b")],
                    total: 40,
                    next_offset: Some(2),
                    has_more: true,
                })
            });

        let client: &dyn LiveSetClient = &mock_client;
        let range = client.listing_range("/classic-livesets/", 0, 2).await?;

        assert_eq!(range.items.len(), 2);
        assert_eq!(range.next_offset, Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_pages() -> Result<()> {
        // Iterators and ranges are built on the page primitives; mocking
        // those is usually enough to exercise callers.
        let mut mock_client = MockLiveSetClient::new();

        mock_client
            .expect_get_search_page()
            .with(eq("fisher"), eq(1))
            .returning(|_, page| {
                Ok(TrackPage {
                    tracks: vec![summary("fisher-ultra")],
                    page_number: page,
                    page_size: 1,
                    total_items: 1,
                })
            });
        mock_client
            .expect_base_url()
            .returning(|| "https://www.edmliveset.com".to_string());

        let client: &dyn LiveSetClient = &mock_client;
        let page = client.get_search_page("fisher", 1).await?;

        assert_eq!(page.tracks[0].id, "edmlive:/fisher-ultra");
        assert_eq!(client.base_url(), "https://www.edmliveset.com");

        Ok(())
    }
}
