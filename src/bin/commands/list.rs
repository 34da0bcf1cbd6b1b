use super::output::{output_json, print_range};
use super::OutputOptions;
use edmliveset::{LiveSetClient, LiveSetClientImpl};

/// Handle listing a window of a category path
pub async fn handle_list(
    client: &LiveSetClientImpl,
    path: &str,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Listing {path} from offset {}", options.offset);
    let range = client
        .listing_range(path, options.offset, options.limit)
        .await?;

    if options.json {
        output_json(&range);
    } else {
        print_range(&range, options.offset);
    }
    Ok(())
}

/// Handle searching the catalog
pub async fn handle_search(
    client: &LiveSetClientImpl,
    query: &str,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Searching for '{query}' from offset {}", options.offset);
    let range = client
        .search_range(query, options.offset, options.limit)
        .await?;

    if options.json {
        output_json(&range);
    } else {
        println!("🔍 Results for '{query}':");
        print_range(&range, options.offset);
    }
    Ok(())
}
