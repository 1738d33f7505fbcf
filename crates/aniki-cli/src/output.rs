//! Command output: summary tables via `tracing`, or raw JSON on stdout.

use aniki_api::kitsu::types::{
    AnimeAttributes, ChapterAttributes, EpisodeAttributes, MangaAttributes, MediaAttributes,
    Resource, Titles,
};
use anyhow::{Context, Result};
use serde::Serialize;

/// Prints a document as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(document: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(document).context("failed to serialize response")?;
    println!("{json}");
    Ok(())
}

/// Best display title: canonical, then English, then romanized, then Japanese.
pub fn display_title<'a>(canonical: Option<&'a str>, titles: &'a Titles) -> &'a str {
    canonical
        .or(titles.en.as_deref())
        .or(titles.en_jp.as_deref())
        .or(titles.ja_jp.as_deref())
        .unwrap_or("-")
}

fn media_title(media: &MediaAttributes) -> &str {
    display_title(media.canonical_title.as_deref(), &media.titles)
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Logs an anime search or list result.
pub fn log_anime_list(items: &[Resource<AnimeAttributes>], count: Option<u64>) {
    tracing::info!("ID\tType\tEps\tRating\tStart\t\tTitle");
    for item in items {
        let attrs = &item.attributes;
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            item.id,
            or_dash(attrs.subtype.as_ref()),
            or_dash(attrs.episode_count),
            attrs.media.average_rating.as_deref().unwrap_or("-"),
            attrs.media.start_date.as_deref().unwrap_or("-"),
            media_title(&attrs.media),
        );
    }
    log_total(items.len(), count, "anime");
}

/// Logs a manga search or list result.
pub fn log_manga_list(items: &[Resource<MangaAttributes>], count: Option<u64>) {
    tracing::info!("ID\tType\tChs\tVols\tRating\tStart\t\tTitle");
    for item in items {
        let attrs = &item.attributes;
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            item.id,
            or_dash(attrs.subtype.as_ref()),
            or_dash(attrs.chapter_count),
            or_dash(attrs.volume_count),
            attrs.media.average_rating.as_deref().unwrap_or("-"),
            attrs.media.start_date.as_deref().unwrap_or("-"),
            media_title(&attrs.media),
        );
    }
    log_total(items.len(), count, "manga");
}

fn log_total(shown: usize, count: Option<u64>, label: &str) {
    match count {
        Some(count) => tracing::info!("Total: {shown} of {count} {label}"),
        None => tracing::info!("Total: {shown} {label}"),
    }
}

fn log_media(id: &str, media: &MediaAttributes) {
    tracing::info!("ID:         {id}");
    tracing::info!("Title:      {}", media_title(media));
    if let Some(ja) = media.titles.ja_jp.as_deref() {
        tracing::info!("Japanese:   {ja}");
    }
    tracing::info!("Status:     {}", or_dash(media.status.as_ref()));
    tracing::info!("Age rating: {}", or_dash(media.age_rating.as_ref()));
    tracing::info!(
        "Rating:     {}",
        media.average_rating.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Aired:      {} .. {}",
        media.start_date.as_deref().unwrap_or("-"),
        media.end_date.as_deref().unwrap_or("-"),
    );
    if let Some(synopsis) = media.synopsis.as_deref() {
        tracing::info!("Synopsis:   {synopsis}");
    }
}

/// Logs one anime.
pub fn log_anime(item: &Resource<AnimeAttributes>) {
    let attrs = &item.attributes;
    log_media(&item.id, &attrs.media);
    tracing::info!("Type:       {}", or_dash(attrs.subtype.as_ref()));
    tracing::info!(
        "Episodes:   {} x {} min",
        or_dash(attrs.episode_count),
        or_dash(attrs.episode_length)
    );
}

/// Logs one manga.
pub fn log_manga(item: &Resource<MangaAttributes>) {
    let attrs = &item.attributes;
    log_media(&item.id, &attrs.media);
    tracing::info!("Type:       {}", or_dash(attrs.subtype.as_ref()));
    tracing::info!(
        "Chapters:   {} ({} volumes)",
        or_dash(attrs.chapter_count),
        or_dash(attrs.volume_count)
    );
    if let Some(serialization) = attrs.serialization.as_deref() {
        tracing::info!("Magazine:   {serialization}");
    }
}

/// Logs one episode.
pub fn log_episode(item: &Resource<EpisodeAttributes>) {
    let attrs = &item.attributes;
    tracing::info!("ID:         {}", item.id);
    tracing::info!(
        "Title:      {}",
        display_title(attrs.canonical_title.as_deref(), &attrs.titles)
    );
    tracing::info!(
        "Number:     S{} E{} (#{})",
        or_dash(attrs.season_number),
        or_dash(attrs.relative_number),
        or_dash(attrs.number)
    );
    tracing::info!("Airdate:    {}", attrs.airdate.as_deref().unwrap_or("-"));
    tracing::info!("Length:     {} min", or_dash(attrs.length));
}

/// Logs one chapter.
pub fn log_chapter(item: &Resource<ChapterAttributes>) {
    let attrs = &item.attributes;
    tracing::info!("ID:         {}", item.id);
    tracing::info!(
        "Title:      {}",
        display_title(attrs.canonical_title.as_deref(), &attrs.titles)
    );
    tracing::info!(
        "Number:     vol. {} ch. {}",
        or_dash(attrs.volume_number),
        or_dash(attrs.number)
    );
    tracing::info!("Published:  {}", attrs.published.as_deref().unwrap_or("-"));
    tracing::info!("Pages:      {}", or_dash(attrs.length));
}
