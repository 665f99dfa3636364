use crate::error::ProviderError;
use crate::kitsu::client::KitsuClient;
use animeta_models::{
    display_year, is_recent_release, truncate_description, AiringStatus, AnimeRecord, BrowseQuery,
    Genre, Page, SortDirection, SortKey, IMAGE_PLACEHOLDER, NO_DESCRIPTION, UNKNOWN_RATING,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const TRENDING_RANK: u32 = 200;
const GENRE_PAGE_LIMIT: u32 = 40;

#[derive(Debug, Deserialize)]
pub struct ItemDocument {
    pub data: Option<Resource>,
    #[serde(default)]
    pub included: Vec<Included>,
}

#[derive(Debug, Deserialize)]
pub struct ListDocument {
    #[serde(default)]
    pub data: Vec<Resource>,
    #[serde(default)]
    pub included: Vec<Included>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
pub struct GenreListDocument {
    #[serde(default)]
    pub data: Vec<GenreResource>,
}

#[derive(Debug, Deserialize)]
pub struct Resource {
    pub id: String,
    pub attributes: AnimeAttributes,
    #[serde(default)]
    pub relationships: Option<Relationships>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeAttributes {
    #[serde(default)]
    pub titles: Titles,
    pub canonical_title: Option<String>,
    pub synopsis: Option<String>,
    /// Score out of 100, as a decimal string.
    pub average_rating: Option<String>,
    pub start_date: Option<String>,
    pub episode_count: Option<u32>,
    pub popularity_rank: Option<u32>,
    pub poster_image: Option<ImageSet>,
    pub cover_image: Option<ImageSet>,
    pub youtube_video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Titles {
    pub en: Option<String>,
    pub en_jp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageSet {
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Included {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: IncludedAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub struct IncludedAttributes {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Relationships {
    pub genres: Option<RelationshipData>,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipData {
    #[serde(default)]
    pub data: Option<Vec<ResourceIdentifier>>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct GenreResource {
    pub attributes: GenreAttributes,
}

#[derive(Debug, Deserialize)]
pub struct GenreAttributes {
    pub name: Option<String>,
}

pub async fn details(
    client: &KitsuClient,
    id: &str,
    cancel: &CancellationToken,
) -> Result<Option<AnimeRecord>, ProviderError> {
    let params = [("include", "genres".to_string())];
    let document: ItemDocument =
        match client.get(&format!("/anime/{}", id), &params, cancel).await {
            Ok(document) => document,
            Err(ProviderError::Status { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };
    let resource = match document.data {
        Some(resource) => resource,
        None => return Ok(None),
    };

    // The detail response sideloads only this record's genres, so every
    // included genre belongs to it. When the sideload is empty the
    // relationship endpoint is the fallback.
    let mut genres: Vec<String> = document
        .included
        .iter()
        .filter(|included| included.kind == "genres")
        .filter_map(|included| included.attributes.name.as_ref())
        .map(|name| name.to_lowercase())
        .collect();
    if genres.is_empty() {
        genres = resource_genres(client, &resource.id, cancel).await?;
    }

    let mut record = convert(resource, Utc::now());
    record.genres = genres;
    Ok(Some(record))
}

pub async fn search(
    client: &KitsuClient,
    query: &str,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let params = [
        ("filter[text]", query.to_string()),
        ("page[limit]", limit.to_string()),
        ("include", "genres".to_string()),
    ];
    let document: ListDocument = client.get("/anime", &params, cancel).await?;
    Ok(convert_list(document))
}

pub async fn trending(
    client: &KitsuClient,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let params = [("page[limit]", limit.to_string())];
    let document: ListDocument = client.get("/trending/anime", &params, cancel).await?;
    let records = attach_genres(client, document.data, cancel).await?;
    Ok(records.into_iter().map(|r| r.with_trending(true)).collect())
}

pub async fn new_releases(
    client: &KitsuClient,
    limit: u32,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let params = [
        ("filter[status]", "current".to_string()),
        ("sort", "-startDate".to_string()),
        ("page[limit]", limit.to_string()),
    ];
    let document: ListDocument = client.get("/anime", &params, cancel).await?;
    let records = attach_genres(client, document.data, cancel).await?;
    Ok(records.into_iter().map(|r| r.with_new_release(true)).collect())
}

pub async fn browse(
    client: &KitsuClient,
    query: &BrowseQuery,
    cancel: &CancellationToken,
) -> Result<Page<AnimeRecord>, ProviderError> {
    let mut params: Vec<(&str, String)> = vec![
        ("page[limit]", query.limit.to_string()),
        ("page[offset]", query.offset().to_string()),
        ("sort", sort_param(query.sort, query.direction)),
        ("include", "genres".to_string()),
    ];
    if let Some(genre) = query.genre {
        match client.genre_mapping().provider_term("kitsu", genre) {
            Some(term) => params.push(("filter[genres]", term.to_string())),
            None => debug!(genre, "no kitsu term for genre, dropping filter"),
        }
    }
    if let Some(status) = query.status {
        params.push(("filter[status]", wire_status(status).to_string()));
    }

    let document: ListDocument = client.get("/anime", &params, cancel).await?;
    let count = document.meta.as_ref().and_then(|meta| meta.count);
    let last_page = last_page_from_count(count, query.limit, query.page);
    let records = convert_list(document);
    Ok(Page::new(records, query.page, last_page))
}

/// Last page from the JSON:API record count. A missing meta block echoes
/// the requested page.
pub(crate) fn last_page_from_count(count: Option<u64>, limit: u32, page: u32) -> u32 {
    let limit = limit.max(1) as u64;
    count
        .map(|count| ((count + limit - 1) / limit) as u32)
        .unwrap_or(page)
        .max(1)
}

pub async fn genres(
    client: &KitsuClient,
    cancel: &CancellationToken,
) -> Result<Vec<Genre>, ProviderError> {
    let params = [("page[limit]", GENRE_PAGE_LIMIT.to_string())];
    let document: GenreListDocument = client.get("/genres", &params, cancel).await?;
    Ok(document
        .data
        .into_iter()
        .filter_map(|resource| resource.attributes.name)
        .enumerate()
        .map(|(index, name)| Genre { id: index as u32 + 1, name })
        .collect())
}

/// Genres for one record via its relationship endpoint. A failure here is
/// cosmetic, so anything short of cancellation degrades to no genres.
async fn resource_genres(
    client: &KitsuClient,
    id: &str,
    cancel: &CancellationToken,
) -> Result<Vec<String>, ProviderError> {
    let document: GenreListDocument =
        match client.get(&format!("/anime/{}/genres", id), &[], cancel).await {
            Ok(document) => document,
            Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
            Err(err) => {
                warn!(id, error = %err, "genre fetch failed, leaving genres empty");
                return Ok(Vec::new());
            }
        };
    Ok(document
        .data
        .into_iter()
        .filter_map(|resource| resource.attributes.name)
        .map(|name| name.to_lowercase())
        .collect())
}

/// The trending and status-filter endpoints do not honor `include`, so each
/// record's genres come from its own relationship endpoint.
async fn attach_genres(
    client: &KitsuClient,
    resources: Vec<Resource>,
    cancel: &CancellationToken,
) -> Result<Vec<AnimeRecord>, ProviderError> {
    let now = Utc::now();
    let mut records = Vec::with_capacity(resources.len());
    for resource in resources {
        let genres = resource_genres(client, &resource.id, cancel).await?;
        let mut record = convert(resource, now);
        record.genres = genres;
        records.push(record);
    }
    Ok(records)
}

fn convert_list(document: ListDocument) -> Vec<AnimeRecord> {
    let now = Utc::now();
    let included = document.included;
    document
        .data
        .into_iter()
        .map(|resource| {
            let genres = sideloaded_genres(&resource, &included);
            let mut record = convert(resource, now);
            record.genres = genres;
            record
        })
        .collect()
}

/// Resolves a record's genre relationship ids against the document's
/// sideloaded resources.
fn sideloaded_genres(resource: &Resource, included: &[Included]) -> Vec<String> {
    let ids: Vec<&str> = resource
        .relationships
        .as_ref()
        .and_then(|rel| rel.genres.as_ref())
        .and_then(|genres| genres.data.as_ref())
        .map(|data| data.iter().map(|identifier| identifier.id.as_str()).collect())
        .unwrap_or_default();
    included
        .iter()
        .filter(|inc| inc.kind == "genres" && ids.contains(&inc.id.as_str()))
        .filter_map(|inc| inc.attributes.name.as_ref())
        .map(|name| name.to_lowercase())
        .collect()
}

/// JSON:API sort: attribute path, `-` prefix for descending.
pub(crate) fn sort_param(key: SortKey, direction: SortDirection) -> String {
    let attribute = match key {
        SortKey::Score => "averageRating",
        SortKey::Popularity => "userCount",
        SortKey::StartDate => "startDate",
        SortKey::Title => "titles.en",
        SortKey::Rank => "popularityRank",
    };
    // popularityRank counts up from 1, so "descending rank" means the most
    // popular first, which is ascending on the wire. The other attributes
    // sort the obvious way.
    let descending = if key == SortKey::Rank {
        !direction.is_desc()
    } else {
        direction.is_desc()
    };
    if descending {
        format!("-{}", attribute)
    } else {
        attribute.to_string()
    }
}

pub(crate) fn wire_status(status: AiringStatus) -> &'static str {
    match status {
        AiringStatus::Airing => "current",
        AiringStatus::Finished => "finished",
        AiringStatus::Upcoming => "upcoming",
    }
}

/// Score arrives as a decimal string out of 100.
pub(crate) fn parse_rating(raw: &str) -> Option<String> {
    raw.parse::<f64>().ok().map(|score| format!("{:.1}", score / 10.0))
}

fn best_image(set: Option<&ImageSet>) -> Option<String> {
    set.and_then(|images| {
        images
            .large
            .clone()
            .or_else(|| images.medium.clone())
            .or_else(|| images.small.clone())
    })
}

pub(crate) fn convert(resource: Resource, now: DateTime<Utc>) -> AnimeRecord {
    let attributes = resource.attributes;
    let title = attributes
        .titles
        .en
        .clone()
        .or_else(|| attributes.titles.en_jp.clone())
        .or_else(|| attributes.canonical_title.clone())
        .unwrap_or_else(|| "Unknown Title".to_string());
    let start_date = attributes
        .start_date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
    let thumbnail = best_image(attributes.poster_image.as_ref())
        .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string());
    let background_image = attributes
        .cover_image
        .as_ref()
        .and_then(|images| images.large.clone().or_else(|| images.small.clone()))
        .unwrap_or_else(|| thumbnail.clone());
    let short_description = match attributes.synopsis.as_deref() {
        Some(synopsis) if synopsis.chars().count() > 100 => truncate_description(synopsis),
        Some(synopsis) => synopsis.to_string(),
        None => NO_DESCRIPTION.to_string(),
    };

    AnimeRecord {
        id: resource.id,
        title,
        description: attributes
            .synopsis
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        short_description,
        thumbnail,
        background_image,
        video_url: attributes
            .youtube_video_id
            .as_ref()
            .map(|id| format!("https://www.youtube.com/watch?v={}", id)),
        year: display_year(start_date, now),
        rating: attributes
            .average_rating
            .as_deref()
            .and_then(parse_rating)
            .unwrap_or_else(|| UNKNOWN_RATING.to_string()),
        episodes: attributes.episode_count.unwrap_or(0),
        genres: Vec::new(),
        is_new_release: start_date.map(|d| is_recent_release(d, now)).unwrap_or(false),
        is_trending: attributes
            .popularity_rank
            .map(|rank| rank <= TRENDING_RANK)
            .unwrap_or(false),
    }
}
