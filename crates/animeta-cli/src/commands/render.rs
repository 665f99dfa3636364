//! Shared record rendering for the human and JSON output modes.

use crate::output::Output;
use animeta_models::{AnimeRecord, Genre};
use owo_colors::OwoColorize;

/// Shown once per command whenever any rendered record came from the
/// bundled dataset.
pub fn placeholder_banner(output: &Output, records: &[AnimeRecord]) {
    if records.iter().any(|r| r.is_mock()) {
        output.warn("Live catalogs unavailable - showing bundled placeholder data");
    }
}

pub fn record_line(record: &AnimeRecord) -> String {
    let mut flags = String::new();
    if record.is_trending {
        flags.push_str(" [trending]");
    }
    if record.is_new_release {
        flags.push_str(" [new]");
    }
    format!(
        "{:>8}  {} ({})  {} {}  {}{}",
        record.id,
        record.title,
        record.year,
        "★".yellow(),
        record.rating,
        record.genres.join(", ").dimmed(),
        flags,
    )
}

pub fn print_records(output: &Output, heading: &str, records: &[AnimeRecord]) {
    if output.is_json() {
        output.json(&serde_json::to_value(records).unwrap_or_default());
        return;
    }
    output.heading(heading);
    if records.is_empty() {
        output.println("  (no results)");
        return;
    }
    for record in records {
        output.println(format!("  {}", record_line(record)));
    }
}

pub fn print_detail(output: &Output, record: &AnimeRecord) {
    if output.is_json() {
        output.json(&serde_json::to_value(record).unwrap_or_default());
        return;
    }
    output.heading(&record.title);
    output.println(format!("  id:       {}", record.id));
    output.println(format!("  year:     {}", record.year));
    output.println(format!("  rating:   {}", record.rating));
    output.println(format!("  episodes: {}", record.episodes));
    output.println(format!("  genres:   {}", record.genres.join(", ")));
    if record.is_trending {
        output.println("  trending: yes");
    }
    if record.is_new_release {
        output.println("  new release: yes");
    }
    if let Some(video) = &record.video_url {
        output.println(format!("  trailer:  {}", video));
    }
    output.println("");
    output.println(format!("  {}", record.description));
}

pub fn print_genres(output: &Output, genres: &[Genre]) {
    if output.is_json() {
        output.json(&serde_json::to_value(genres).unwrap_or_default());
        return;
    }
    output.heading("Genres");
    for genre in genres {
        output.println(format!("  {:>3}  {}", genre.id, genre.name));
    }
}
