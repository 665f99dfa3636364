use crate::anilist::client::AnilistClient;
use crate::error::ProviderError;
use animeta_models::{
    display_year, is_recent_release, truncate_description, AnimeRecord, BrowseQuery, Genre, Page,
    SortDirection, SortKey, IMAGE_PLACEHOLDER, NO_DESCRIPTION, UNKNOWN_RATING,
};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const MEDIA_FIELDS: &str = r#"
    id
    title { romaji english }
    description
    coverImage { large medium }
    bannerImage
    startDate { year month day }
    episodes
    genres
    averageScore
    popularity
    trending
"#;

static DETAILS_QUERY: Lazy<String> = Lazy::new(|| {
    format!(
        "query ($id: Int) {{ Media(id: $id, type: ANIME) {{ {} }} }}",
        MEDIA_FIELDS
    )
});

static SEARCH_QUERY: Lazy<String> = Lazy::new(|| {
    format!(
        "query ($search: String, $page: Int, $perPage: Int, $sort: [MediaSort]) {{
            Page(page: $page, perPage: $perPage) {{
                pageInfo {{ currentPage lastPage hasNextPage }}
                media(search: $search, type: ANIME, sort: $sort) {{ {} }}
            }}
        }}",
        MEDIA_FIELDS
    )
});

static TRENDING_QUERY: Lazy<String> = Lazy::new(|| {
    format!(
        "query ($page: Int, $perPage: Int) {{
            Page(page: $page, perPage: $perPage) {{
                pageInfo {{ currentPage lastPage hasNextPage }}
                media(type: ANIME, sort: TRENDING_DESC) {{ {} }}
            }}
        }}",
        MEDIA_FIELDS
    )
});

static NEW_RELEASES_QUERY: Lazy<String> = Lazy::new(|| {
    format!(
        "query ($page: Int, $perPage: Int) {{
            Page(page: $page, perPage: $perPage) {{
                pageInfo {{ currentPage lastPage hasNextPage }}
                media(type: ANIME, status: RELEASING, sort: START_DATE_DESC) {{ {} }}
            }}
        }}",
        MEDIA_FIELDS
    )
});

static BROWSE_QUERY: Lazy<String> = Lazy::new(|| {
    format!(
        "query ($page: Int, $perPage: Int, $sort: [MediaSort]) {{
            Page(page: $page, perPage: $perPage) {{
                pageInfo {{ currentPage lastPage hasNextPage }}
                media(type: ANIME, sort: $sort) {{ {} }}
            }}
        }}",
        MEDIA_FIELDS
    )
});

static BROWSE_WITH_GENRE_QUERY: Lazy<String> = Lazy::new(|| {
    format!(
        "query ($page: Int, $perPage: Int, $sort: [MediaSort], $genre: String) {{
            Page(page: $page, perPage: $perPage) {{
                pageInfo {{ currentPage lastPage hasNextPage }}
                media(type: ANIME, sort: $sort, genre: $genre) {{ {} }}
            }}
        }}",
        MEDIA_FIELDS
    )
});

const GENRES_QUERY: &str = "query { GenreCollection }";

#[derive(Debug, Deserialize)]
pub struct Media {
    pub id: u64,
    pub title: Title,
    pub description: Option<String>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<CoverImage>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<FuzzyDate>,
    pub episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "averageScore")]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub trending: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Title {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

/// Partial dates: month and day may be missing even when the year exists.
#[derive(Debug, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    #[serde(rename = "Media")]
    media: Option<Media>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: PageBlock,
}

#[derive(Debug, Deserialize)]
struct PageBlock {
    #[serde(rename = "pageInfo")]
    page_info: Option<PageInfo>,
    #[serde(default)]
    media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(rename = "currentPage")]
    current_page: Option<u32>,
    #[serde(rename = "lastPage")]
    last_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenreData {
    #[serde(rename = "GenreCollection")]
    genre_collection: Vec<String>,
}

pub async fn details(
    client: &AnilistClient,
    id: &str,
    cancel: &CancellationToken,
) -> Result<Option<AnimeRecord>, ProviderError> {
    // This upstream only knows integer ids; anything else cannot match.
    let numeric_id: i64 = match id.parse() {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };
    let data: MediaData = client
        .query(&DETAILS_QUERY, json!({ "id": numeric_id }), cancel)
        .await?;
    Ok(data.media.map(|media| convert_media(media, Utc::now())))
}

pub async fn search(
    client: &AnilistClient,
    query: &str,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let data: PageData = client
        .query(
            &SEARCH_QUERY,
            json!({ "search": query, "page": 1, "perPage": limit, "sort": ["POPULARITY_DESC"] }),
            cancel,
        )
        .await?;
    let now = Utc::now();
    Ok(data.page.media.into_iter().map(|m| convert_media(m, now)).collect())
}

pub async fn trending(
    client: &AnilistClient,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let data: PageData = client
        .query(&TRENDING_QUERY, json!({ "page": 1, "perPage": limit }), cancel)
        .await?;
    let now = Utc::now();
    Ok(data
        .page
        .media
        .into_iter()
        .map(|m| convert_media(m, now).with_trending(true))
        .collect())
}

pub async fn new_releases(
    client: &AnilistClient,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let data: PageData = client
        .query(&NEW_RELEASES_QUERY, json!({ "page": 1, "perPage": limit }), cancel)
        .await?;
    let now = Utc::now();
    Ok(data
        .page
        .media
        .into_iter()
        .map(|m| convert_media(m, now).with_new_release(true))
        .collect())
}

pub async fn browse(
    client: &AnilistClient,
    query: &BrowseQuery,
    cancel: &CancellationToken,
) -> Result<Page<AnimeRecord>, ProviderError> {
    let sort = sort_term(query.sort, query.direction);
    let genre_term = query
        .genre
        .and_then(|id| client.genre_mapping().provider_term("anilist", id));
    if query.genre.is_some() && genre_term.is_none() {
        debug!(genre = query.genre, "no anilist term for canonical genre, dropping filter");
    }

    let data: PageData = match genre_term {
        Some(term) => {
            client
                .query(
                    &BROWSE_WITH_GENRE_QUERY,
                    json!({
                        "page": query.page,
                        "perPage": query.limit,
                        "sort": [sort],
                        "genre": term,
                    }),
                    cancel,
                )
                .await?
        }
        None => {
            client
                .query(
                    &BROWSE_QUERY,
                    json!({ "page": query.page, "perPage": query.limit, "sort": [sort] }),
                    cancel,
                )
                .await?
        }
    };

    let now = Utc::now();
    let (current_page, last_page) = page_bounds(data.page.page_info, query.page);
    let records: Vec<AnimeRecord> =
        data.page.media.into_iter().map(|m| convert_media(m, now)).collect();
    Ok(Page::new(records, current_page, last_page))
}

/// Page bounds from the pageInfo block; a missing or partial block echoes
/// the requested page.
fn page_bounds(page_info: Option<PageInfo>, page: u32) -> (u32, u32) {
    match page_info {
        Some(info) => (info.current_page.unwrap_or(page), info.last_page.unwrap_or(page)),
        None => (page, page),
    }
}

pub async fn genres(
    client: &AnilistClient,
    cancel: &CancellationToken,
) -> Result<Vec<Genre>, ProviderError> {
    let data: GenreData = client.query(GENRES_QUERY, json!({}), cancel).await?;
    // Locally invented 1-based ids: stable only until the next fetch.
    Ok(data
        .genre_collection
        .into_iter()
        .enumerate()
        .map(|(idx, name)| Genre::new(idx as u32 + 1, name))
        .collect())
}

/// Map the shared sort vocabulary onto MediaSort enum values.
pub(crate) fn sort_term(key: SortKey, direction: SortDirection) -> String {
    let base = match key {
        SortKey::Score => "SCORE",
        SortKey::Popularity => "POPULARITY",
        SortKey::StartDate => "START_DATE",
        SortKey::Title => "TITLE_ROMAJI",
        SortKey::Rank => "POPULARITY",
    };
    let suffix = if direction.is_desc() { "_DESC" } else { "_ASC" };
    format!("{}{}", base, suffix)
}

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Descriptions arrive with embedded HTML markup.
pub(crate) fn strip_html(raw: &str) -> String {
    HTML_TAG.replace_all(raw, "").into_owned()
}

fn fuzzy_to_date(date: &FuzzyDate) -> Option<NaiveDate> {
    let year = date.year?;
    NaiveDate::from_ymd_opt(year, date.month.unwrap_or(1), date.day.unwrap_or(1))
}

pub(crate) fn convert_media(media: Media, now: DateTime<Utc>) -> AnimeRecord {
    let description = media.description.as_deref().map(strip_html);
    let start_date = media.start_date.as_ref().and_then(fuzzy_to_date);
    let thumbnail = media
        .cover_image
        .as_ref()
        .and_then(|c| c.large.clone().or_else(|| c.medium.clone()))
        .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string());
    AnimeRecord {
        id: media.id.to_string(),
        title: media
            .title
            .english
            .or(media.title.romaji)
            .unwrap_or_else(|| "Unknown Title".to_string()),
        short_description: description
            .as_deref()
            .map(truncate_description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        background_image: media.banner_image.unwrap_or_else(|| thumbnail.clone()),
        thumbnail,
        video_url: None,
        year: display_year(start_date, now),
        rating: media
            .average_score
            .map(|score| format!("{:.1}", score / 10.0))
            .unwrap_or_else(|| UNKNOWN_RATING.to_string()),
        episodes: media.episodes.unwrap_or(0),
        genres: media.genres.iter().map(|g| g.to_lowercase()).collect(),
        is_new_release: start_date.map(|d| is_recent_release(d, now)).unwrap_or(false),
        is_trending: media.trending.map(|t| t > 0).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn media(json: serde_json::Value) -> Media {
        serde_json::from_value(json).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn conversion_prefers_english_title_and_scales_score() {
        let record = convert_media(
            media(serde_json::json!({
                "id": 21,
                "title": {"romaji": "Wan Pisu", "english": "One Piece"},
                "description": "<p>Pirates <b>sail</b>.</p>",
                "coverImage": {"large": "https://img/l.jpg", "medium": "https://img/m.jpg"},
                "bannerImage": "https://img/banner.jpg",
                "startDate": {"year": 1999, "month": 10, "day": 20},
                "episodes": 1000,
                "genres": ["Action", "Adventure"],
                "averageScore": 88,
                "trending": 12
            })),
            now(),
        );
        assert_eq!(record.title, "One Piece");
        assert_eq!(record.description, "Pirates sail.");
        assert_eq!(record.rating, "8.8");
        assert_eq!(record.background_image, "https://img/banner.jpg");
        assert_eq!(record.genres, vec!["action", "adventure"]);
        assert_eq!(record.year, 1999);
        assert!(record.is_trending);
        assert!(!record.is_new_release);
    }

    #[test]
    fn missing_title_variants_fall_back() {
        let record = convert_media(
            media(serde_json::json!({"id": 1, "title": {"romaji": null, "english": null}})),
            now(),
        );
        assert_eq!(record.title, "Unknown Title");
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.rating, UNKNOWN_RATING);
        assert_eq!(record.thumbnail, IMAGE_PLACEHOLDER);
        assert_eq!(record.background_image, IMAGE_PLACEHOLDER);
    }

    #[test]
    fn fuzzy_dates_default_month_and_day() {
        let record = convert_media(
            media(serde_json::json!({
                "id": 2,
                "title": {"romaji": "New Show", "english": null},
                "startDate": {"year": 2024, "month": 5, "day": null}
            })),
            now(),
        );
        assert!(record.is_new_release);
        assert_eq!(record.year, 2024);
    }

    #[test]
    fn zero_trending_is_not_trending() {
        let record = convert_media(
            media(serde_json::json!({
                "id": 3,
                "title": {"romaji": "Quiet", "english": null},
                "trending": 0
            })),
            now(),
        );
        assert!(!record.is_trending);
    }

    #[test]
    fn sort_terms_match_media_sort_enum() {
        assert_eq!(sort_term(SortKey::Score, SortDirection::Desc), "SCORE_DESC");
        assert_eq!(sort_term(SortKey::Title, SortDirection::Asc), "TITLE_ROMAJI_ASC");
        // Rank has no direct equivalent and approximates to popularity.
        assert_eq!(sort_term(SortKey::Rank, SortDirection::Desc), "POPULARITY_DESC");
    }

    #[test]
    fn page_bounds_come_from_page_info() {
        let info = PageInfo { current_page: Some(2), last_page: Some(40) };
        assert_eq!(page_bounds(Some(info), 2), (2, 40));
    }

    #[test]
    fn missing_or_partial_page_info_echoes_the_request() {
        assert_eq!(page_bounds(None, 3), (3, 3));
        let partial = PageInfo { current_page: None, last_page: Some(7) };
        assert_eq!(page_bounds(Some(partial), 3), (3, 7));
    }

    #[test]
    fn html_stripping_removes_tags_only() {
        assert_eq!(strip_html("<i>A</i> war <br> story"), "A war  story");
        assert_eq!(strip_html("plain"), "plain");
    }
}
