use super::output::{output_json, print_track};
use super::OutputOptions;
use edmliveset::types::format_duration;
use edmliveset::{LiveSetClient, LiveSetClientImpl};

/// Handle showing the details of one track
pub async fn handle_show(
    client: &LiveSetClientImpl,
    track: &str,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let detail = client.get_track(track).await?;

    if options.json {
        output_json(&detail);
        return Ok(());
    }

    println!("🎵 {}", detail.title());
    println!("   ID:       {}", detail.id());
    println!("   URL:      {}", detail.summary.url);
    println!("   Artists:  {}", detail.summary.artists.join(", "));
    if !detail.genres.is_empty() {
        println!("   Genres:   {}", detail.genres.join(", "));
    }
    if let Some(event) = &detail.event {
        println!("   Event:    {event}");
    }
    if let Some(date) = &detail.summary.added_date {
        println!("   Added:    {date}");
    }
    if detail.duration_ms > 0 {
        println!("   Duration: {}", format_duration(detail.duration_ms));
    }
    match &detail.audio_url {
        Some(audio) => println!("   Audio:    {audio}"),
        None => println!("   Audio:    (not available)"),
    }
    if let Some(image) = &detail.summary.image {
        println!("   Image:    {image}");
    }
    Ok(())
}

/// Handle suggesting tracks after the given one
pub async fn handle_radio(
    client: &LiveSetClientImpl,
    track: &str,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracks = client.radio(track, options.limit).await?;

    if options.json {
        output_json(&tracks);
        return Ok(());
    }

    if tracks.is_empty() {
        println!("No suggestions found.");
    }
    for (i, track) in tracks.iter().enumerate() {
        print_track(i, track);
    }
    Ok(())
}
