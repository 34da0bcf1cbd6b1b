//! Offset/limit windows over page-numbered sources.
//!
//! The site only serves numbered pages whose size is unknown until one has
//! been fetched. [`collect_range`] turns that into an exact `(offset, limit)`
//! window, re-deriving page numbers and intra-page positions from the latest
//! page size every time a page is fetched.

use crate::types::{RangeResult, TrackPage};
use crate::Result;
use std::future::Future;

/// 1-indexed page that holds the item at `cursor`.
fn page_for(cursor: usize, page_size: usize) -> u32 {
    u32::try_from(cursor / page_size + 1).unwrap_or(u32::MAX)
}

/// Whether `page` sizes itself from its own items and is the last page.
///
/// Such a page may be shorter than the real page size, so its reported size
/// cannot place the cursor.
fn is_self_sized_last_page(page: &TrackPage) -> bool {
    page.page_size > 0
        && page.page_size == page.tracks.len()
        && page.page_number as usize >= page.total_items.div_ceil(page.page_size)
}

/// Collect `limit` items starting at `offset` from a page-numbered source.
///
/// `fetch_page` is called with 1-indexed page numbers. `initial_page_size` is
/// the estimate used until a page reports its real size. Fewer than `limit`
/// items are returned only when the source is exhausted.
///
/// The first page that reports a size replaces the estimate. If the cursor
/// lives on a different page under that size, that page is fetched instead,
/// or the range ends when the reported total says it does not exist. An empty page, or a last page
/// that sizes itself from its own items, says nothing about the real size:
/// when one is hit before the size is known, page 1 is fetched to learn it
/// and the held page is reused if the cursor still lands on it. Once known,
/// the size is only replaced by larger reports: a short final page must not
/// shift the intra-page position.
pub async fn collect_range<F, Fut>(
    mut fetch_page: F,
    offset: usize,
    limit: usize,
    initial_page_size: usize,
) -> Result<RangeResult>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<TrackPage>>,
{
    let mut page_size = initial_page_size.max(1);
    let mut size_known = false;
    let mut cursor = offset;
    let mut total = 0;
    let mut items = Vec::new();
    let mut next_page = None;
    let mut held: Option<TrackPage> = None;

    while items.len() < limit {
        let sizing_detour = next_page.is_some();
        let page_number = next_page
            .take()
            .unwrap_or_else(|| page_for(cursor, page_size));
        let page = match held.take_if(|page| page.page_number == page_number) {
            Some(page) => page,
            None => fetch_page(page_number).await?,
        };

        if !size_known
            && page_number > 1
            && (page.tracks.is_empty() || is_self_sized_last_page(&page))
        {
            log::debug!("Page {page_number} cannot place item {cursor}, sizing from page 1");
            held = Some(page);
            next_page = Some(1);
            continue;
        }

        if sizing_detour && page.page_size == 0 {
            log::debug!("Page 1 reports no page size, range exhausted at {cursor}");
            total = page.total_items;
            break;
        }

        let first_sizing = !size_known && page.page_size > 0;
        if first_sizing || page.page_size > page_size {
            page_size = page.page_size;
            size_known = true;
        }
        total = page.total_items;

        if page.tracks.is_empty() {
            log::debug!("Page {page_number} is empty, range exhausted at {cursor}");
            break;
        }

        if first_sizing {
            let aligned_page = page_for(cursor, page_size);
            if aligned_page != page_number {
                if (aligned_page as usize) > total.div_ceil(page_size) {
                    log::debug!("Item {cursor} is past the last page, range exhausted");
                    break;
                }
                log::debug!(
                    "Page size is {page_size}, item {cursor} lives on page {aligned_page} not {page_number}"
                );
                continue;
            }
        }

        let start = cursor % page_size;
        let slice = page.tracks.into_iter().skip(start);
        let before = items.len();
        for track in slice {
            if items.len() >= limit {
                break;
            }
            items.push(track);
            cursor += 1;
        }

        if items.len() == before {
            log::debug!("Page {page_number} has nothing past index {start}, stopping");
            break;
        }
        if cursor >= total {
            break;
        }
    }

    let collected = items.len();
    let has_more = offset + collected < total;
    log::debug!("Collected {collected} items at offset {offset} (total {total}, more: {has_more})");

    Ok(RangeResult {
        items,
        total,
        next_offset: has_more.then_some(offset + collected),
        has_more,
    })
}
