use super::output::{output_json, print_range, print_track};
use super::OutputOptions;
use edmliveset::{LiveSetClient, LiveSetClientImpl, SECTIONS};
use serde::Serialize;

#[derive(Serialize)]
struct SectionInfo<'a> {
    id: &'a str,
    title: &'a str,
    url: String,
}

/// Handle listing the known browse sections
pub fn handle_sections(
    client: &LiveSetClientImpl,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = client.base_url();
    for section in &SECTIONS {
        let info = SectionInfo {
            id: section.id,
            title: section.title,
            url: section.external_url(&base_url),
        };
        if options.json {
            output_json(&info);
        } else {
            println!("{:<20} {} ({})", info.id, info.title, info.url);
        }
    }
    Ok(())
}

/// Handle browsing the first tracks of every section
pub async fn handle_browse(
    client: &LiveSetClientImpl,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let sections = client.browse_sections(0, SECTIONS.len()).await?;

    for section in &sections {
        if options.json {
            output_json(section);
            continue;
        }

        println!("🎧 {} ({})", section.title, section.external_url);
        for (i, track) in section.items.iter().enumerate() {
            print_track(i, track);
        }
        if section.browse_more {
            println!("      ... more with `edmliveset browse {}`", section.id);
        }
        println!();
    }
    Ok(())
}

/// Handle showing a window of one section
pub async fn handle_section(
    client: &LiveSetClientImpl,
    section: &str,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let range = client
        .section_range(section, options.offset, options.limit)
        .await?;

    if options.json {
        output_json(&range);
    } else {
        print_range(&range, options.offset);
    }
    Ok(())
}
