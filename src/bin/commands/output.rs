use edmliveset::{RangeResult, TrackSummary};
use serde::Serialize;

/// Output a value as one JSON line on stdout
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize output to JSON: {e}"),
    }
}

/// Print a numbered track line, numbered from `offset`
pub fn print_track(index: usize, track: &TrackSummary) {
    println!("{:>4}. {track}", index + 1);
    println!("      {} | {}", track.artists.join(", "), track.id);
}

/// Print a range of tracks followed by its pagination footer
pub fn print_range(range: &RangeResult, offset: usize) {
    if range.items.is_empty() {
        println!("No tracks found.");
        return;
    }

    for (i, track) in range.items.iter().enumerate() {
        print_track(offset + i, track);
    }

    println!();
    match range.next_offset {
        Some(next) => println!(
            "Showing {}-{} of ~{} (next: --offset {next})",
            offset + 1,
            offset + range.items.len(),
            range.total
        ),
        None => println!(
            "Showing {}-{} of {}",
            offset + 1,
            offset + range.items.len(),
            range.total
        ),
    }
}
