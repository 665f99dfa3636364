use crate::error::ProviderError;
use crate::mal::client::MalClient;
use animeta_models::{
    display_year, is_recent_release, truncate_description, AiringStatus, AnimeRecord, BrowseQuery,
    Page, SortDirection, SortKey, IMAGE_PLACEHOLDER, NO_DESCRIPTION, UNKNOWN_RATING,
};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Url;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

pub const LIST_FIELDS: &str = "id,title,main_picture,alternative_titles,start_date,end_date,\
synopsis,mean,rank,popularity,num_episodes,media_type,status,genres,num_list_users";

pub const DETAIL_FIELDS: &str = "id,title,main_picture,alternative_titles,start_date,end_date,\
synopsis,mean,rank,popularity,num_episodes,media_type,status,genres,num_list_users,pictures,background";

/// Popularity rank threshold on the detail path. The list-conversion path
/// uses 200; the split is inherited behavior and intentionally not unified.
const DETAIL_TRENDING_RANK: u32 = 100;
const LIST_TRENDING_RANK: u32 = 200;

#[derive(Debug, Deserialize)]
pub struct AnimeNode {
    pub id: u64,
    pub title: String,
    pub main_picture: Option<Picture>,
    pub start_date: Option<String>,
    pub synopsis: Option<String>,
    pub mean: Option<f64>,
    pub popularity: Option<u32>,
    pub num_episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<NamedEntity>,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

#[derive(Debug, Deserialize)]
pub struct Picture {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub data: Vec<ListEntry>,
    #[serde(default)]
    pub paging: Paging,
}

#[derive(Debug, Deserialize)]
pub struct ListEntry {
    pub node: AnimeNode,
}

#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    pub next: Option<String>,
}

pub async fn details(
    client: &MalClient,
    id: &str,
    cancel: &CancellationToken,
) -> Result<Option<AnimeRecord>, ProviderError> {
    let params = [("fields", DETAIL_FIELDS.to_string())];
    let node: AnimeNode = match client.get(&format!("/anime/{}", id), &params, cancel).await {
        Ok(node) => node,
        Err(ProviderError::Status { status: 404, .. }) => return Ok(None),
        Err(err) => return Err(err),
    };
    Ok(Some(convert_detail(node, Utc::now())))
}

pub async fn search(
    client: &MalClient,
    query: &str,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let params = [
        ("q", query.to_string()),
        ("limit", limit.to_string()),
        ("fields", LIST_FIELDS.to_string()),
    ];
    let response: ListResponse = client.get("/anime", &params, cancel).await?;
    let now = Utc::now();
    Ok(response.data.into_iter().map(|entry| convert_node(entry.node, now)).collect())
}

pub async fn trending(
    client: &MalClient,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let records = ranking(client, "bypopularity", limit, cancel).await?;
    Ok(records.into_iter().map(|r| r.with_trending(true)).collect())
}

pub async fn new_releases(
    client: &MalClient,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let records = ranking(client, "airing", limit, cancel).await?;
    Ok(records.into_iter().map(|r| r.with_new_release(true)).collect())
}

async fn ranking(
    client: &MalClient,
    ranking_type: &str,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let params = [
        ("ranking_type", ranking_type.to_string()),
        ("limit", limit.to_string()),
        ("fields", LIST_FIELDS.to_string()),
    ];
    let response: ListResponse = client.get("/anime/ranking", &params, cancel).await?;
    let now = Utc::now();
    Ok(response.data.into_iter().map(|entry| convert_node(entry.node, now)).collect())
}

pub async fn browse(
    client: &MalClient,
    query: &BrowseQuery,
    cancel: &CancellationToken,
) -> Result<Page<AnimeRecord>, ProviderError> {
    let mut params: Vec<(&str, String)> = vec![
        ("limit", query.limit.to_string()),
        ("offset", query.offset().to_string()),
        ("fields", LIST_FIELDS.to_string()),
        ("sort", sort_param(query.sort, query.direction)),
    ];
    if let Some(genre) = query.genre {
        params.push(("genre", genre.to_string()));
    }
    if let Some(status) = query.status {
        params.push(("status", wire_status(status).to_string()));
    }
    if let Some(min) = query.min_score {
        params.push(("min_score", min.to_string()));
    }
    if let Some(max) = query.max_score {
        params.push(("max_score", max.to_string()));
    }
    if let (Some(season), Some(year)) = (&query.season, query.year) {
        params.push(("season", season.clone()));
        params.push(("year", year.to_string()));
    }

    let response: ListResponse = client.get("/anime", &params, cancel).await?;
    let last_page = last_page_from_next(response.paging.next.as_deref(), query.page, query.limit);
    let now = Utc::now();
    let records: Vec<AnimeRecord> =
        response.data.into_iter().map(|entry| convert_node(entry.node, now)).collect();
    Ok(Page::new(records, query.page, last_page))
}

/// The browse endpoint takes the bare sort name for descending and an
/// `_asc` suffix for ascending.
pub(crate) fn sort_param(key: SortKey, direction: SortDirection) -> String {
    if direction.is_desc() {
        key.primary_wire_name().to_string()
    } else {
        format!("{}_asc", key.primary_wire_name())
    }
}

pub(crate) fn wire_status(status: AiringStatus) -> &'static str {
    match status {
        AiringStatus::Airing => "currently_airing",
        AiringStatus::Finished => "finished_airing",
        AiringStatus::Upcoming => "not_yet_aired",
    }
}

/// Total size is not reported directly; it is recovered from the paging
/// `next` URL's offset. An unparsable `next` still means at least one more
/// page exists.
pub(crate) fn last_page_from_next(next: Option<&str>, page: u32, limit: u32) -> u32 {
    let limit = limit.max(1);
    let next = match next {
        Some(url) if !url.is_empty() => url,
        _ => return page,
    };
    let offset = Url::parse(next).ok().and_then(|url| {
        url.query_pairs()
            .find(|(key, _)| key == "offset")
            .and_then(|(_, value)| value.parse::<u32>().ok())
    });
    match offset {
        Some(offset) => {
            let total = offset + limit;
            (total + limit - 1) / limit
        }
        None => page + 1,
    }
}

/// Start dates arrive as `YYYY-MM-DD`, `YYYY-MM`, or bare `YYYY`.
pub(crate) fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(&format!("{}-01-01", raw), "%Y-%m-%d").ok()
}

fn best_picture(picture: Option<&Picture>) -> Option<String> {
    picture.and_then(|p| p.large.clone().or_else(|| p.medium.clone()))
}

fn convert_common(node: AnimeNode, now: DateTime<Utc>, trending_rank: u32) -> AnimeRecord {
    let start_date = node.start_date.as_deref().and_then(parse_start_date);
    let thumbnail = best_picture(node.main_picture.as_ref())
        .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string());
    AnimeRecord {
        id: node.id.to_string(),
        title: node.title,
        description: node
            .synopsis
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        short_description: node
            .synopsis
            .as_deref()
            .map(truncate_description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        background_image: thumbnail.clone(),
        thumbnail,
        video_url: None,
        year: display_year(start_date, now),
        rating: node
            .mean
            .map(|mean| format!("{:.1}", mean))
            .unwrap_or_else(|| UNKNOWN_RATING.to_string()),
        episodes: node.num_episodes.unwrap_or(0),
        genres: node.genres.iter().map(|g| g.name.to_lowercase()).collect(),
        is_new_release: start_date.map(|d| is_recent_release(d, now)).unwrap_or(false),
        is_trending: node.popularity.map(|rank| rank <= trending_rank).unwrap_or(false),
    }
}

pub(crate) fn convert_node(node: AnimeNode, now: DateTime<Utc>) -> AnimeRecord {
    convert_common(node, now, LIST_TRENDING_RANK)
}

/// Detail responses carry extra pictures; the first one becomes the
/// background, falling back to the poster.
pub(crate) fn convert_detail(node: AnimeNode, now: DateTime<Utc>) -> AnimeRecord {
    let background = node.pictures.first().and_then(|p| p.large.clone().or_else(|| p.medium.clone()));
    let mut record = convert_common(node, now, DETAIL_TRENDING_RANK);
    if let Some(background) = background {
        record.background_image = background;
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn node(json: serde_json::Value) -> AnimeNode {
        serde_json::from_value(json).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn conversion_fills_every_required_field() {
        let record = convert_node(
            node(serde_json::json!({
                "id": 1535,
                "title": "Death Note",
                "main_picture": {"large": "https://img/large.jpg", "medium": "https://img/med.jpg"},
                "start_date": "2006-10-04",
                "synopsis": "A shinigami drops a notebook.",
                "mean": 8.62,
                "popularity": 2,
                "num_episodes": 37,
                "genres": [{"name": "Mystery"}, {"name": "Supernatural"}]
            })),
            now(),
        );
        assert_eq!(record.id, "1535");
        assert_eq!(record.thumbnail, "https://img/large.jpg");
        assert_eq!(record.background_image, record.thumbnail);
        assert_eq!(record.rating, "8.6");
        assert_eq!(record.year, 2006);
        assert_eq!(record.episodes, 37);
        assert_eq!(record.genres, vec!["mystery", "supernatural"]);
        assert!(record.is_trending);
        assert!(!record.is_new_release);
    }

    #[test]
    fn missing_optionals_get_display_defaults() {
        let record = convert_node(
            node(serde_json::json!({"id": 99, "title": "Obscure"})),
            now(),
        );
        assert_eq!(record.description, NO_DESCRIPTION);
        assert_eq!(record.short_description, NO_DESCRIPTION);
        assert_eq!(record.thumbnail, IMAGE_PLACEHOLDER);
        assert_eq!(record.rating, UNKNOWN_RATING);
        assert_eq!(record.year, 2024);
        assert_eq!(record.episodes, 0);
        assert!(record.genres.is_empty());
        assert!(!record.is_trending);
    }

    #[test]
    fn detail_threshold_is_tighter_than_list_threshold() {
        let raw = serde_json::json!({"id": 5, "title": "Mid", "popularity": 150});
        assert!(convert_node(node(raw.clone()), now()).is_trending);
        assert!(!convert_detail(node(raw), now()).is_trending);
    }

    #[test]
    fn detail_background_comes_from_pictures() {
        let record = convert_detail(
            node(serde_json::json!({
                "id": 5,
                "title": "Art",
                "main_picture": {"large": "https://img/poster.jpg", "medium": null},
                "pictures": [{"large": "https://img/banner.jpg", "medium": null}]
            })),
            now(),
        );
        assert_eq!(record.thumbnail, "https://img/poster.jpg");
        assert_eq!(record.background_image, "https://img/banner.jpg");
    }

    #[test]
    fn sort_param_appends_asc_suffix_only_when_ascending() {
        assert_eq!(sort_param(SortKey::Score, SortDirection::Desc), "anime_score");
        assert_eq!(sort_param(SortKey::Score, SortDirection::Asc), "anime_score_asc");
        assert_eq!(sort_param(SortKey::Rank, SortDirection::Desc), "rank");
    }

    #[test]
    fn last_page_derivation_from_next_url() {
        let next = "https://api.myanimelist.net/v2/anime?offset=48&limit=24";
        assert_eq!(last_page_from_next(Some(next), 2, 24), 3);
        // Unparsable next still promises at least one more page.
        assert_eq!(last_page_from_next(Some("not a url"), 2, 24), 3);
        assert_eq!(last_page_from_next(None, 2, 24), 2);
        // A zero limit never divides.
        assert_eq!(last_page_from_next(Some(next), 2, 0), 49);
    }

    #[test]
    fn partial_start_dates_parse() {
        assert_eq!(parse_start_date("2024-04-07"), NaiveDate::from_ymd_opt(2024, 4, 7));
        assert_eq!(parse_start_date("2024-04"), NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(parse_start_date("2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_start_date("soon"), None);
    }
}
