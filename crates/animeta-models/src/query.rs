use std::fmt;
use std::str::FromStr;

/// Shared sort vocabulary. Each provider adapter maps these onto its own
/// wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Score,
    Popularity,
    StartDate,
    Title,
    Rank,
}

impl SortKey {
    /// Wire name on the primary provider's browse endpoint.
    pub fn primary_wire_name(&self) -> &'static str {
        match self {
            SortKey::Score => "anime_score",
            SortKey::Popularity => "anime_num_list_users",
            SortKey::StartDate => "start_date",
            SortKey::Title => "title",
            SortKey::Rank => "rank",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score" | "anime_score" => Ok(SortKey::Score),
            "popularity" | "anime_num_list_users" => Ok(SortKey::Popularity),
            "start_date" | "startdate" => Ok(SortKey::StartDate),
            "title" => Ok(SortKey::Title),
            "rank" => Ok(SortKey::Rank),
            other => Err(format!(
                "unknown sort key '{}' (expected one of: score, popularity, start_date, title, rank)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Score => "score",
            SortKey::Popularity => "popularity",
            SortKey::StartDate => "start_date",
            SortKey::Title => "title",
            SortKey::Rank => "rank",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn is_desc(&self) -> bool {
        matches!(self, SortDirection::Desc)
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}' (expected asc or desc)", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Airing status filter, normalized across providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiringStatus {
    Airing,
    Finished,
    Upcoming,
}

impl FromStr for AiringStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "airing" | "currently_airing" | "current" | "releasing" => Ok(AiringStatus::Airing),
            "finished" | "finished_airing" | "complete" | "completed" => Ok(AiringStatus::Finished),
            "upcoming" | "not_yet_aired" | "unreleased" => Ok(AiringStatus::Upcoming),
            other => Err(format!(
                "unknown status '{}' (expected one of: airing, finished, upcoming)",
                other
            )),
        }
    }
}

impl fmt::Display for AiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiringStatus::Airing => write!(f, "airing"),
            AiringStatus::Finished => write!(f, "finished"),
            AiringStatus::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// Parameters for the paginated browse operation.
///
/// The score and season filters are honored by the primary provider only;
/// the other adapters ignore them.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub sort: SortKey,
    pub direction: SortDirection,
    /// Canonical genre catalog id.
    pub genre: Option<u32>,
    pub status: Option<AiringStatus>,
    pub min_score: Option<f32>,
    pub max_score: Option<f32>,
    pub season: Option<String>,
    pub year: Option<i32>,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 24,
            sort: SortKey::default(),
            direction: SortDirection::default(),
            genre: None,
            status: None,
            min_score: None,
            max_score: None,
            season: None,
            year: None,
        }
    }
}

impl BrowseQuery {
    /// Zero-based record offset for offset-paginated providers. Saturates
    /// rather than overflowing on absurd page numbers.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_canonical_and_wire_names() {
        assert_eq!("score".parse::<SortKey>().unwrap(), SortKey::Score);
        assert_eq!("anime_score".parse::<SortKey>().unwrap(), SortKey::Score);
        assert_eq!("anime_num_list_users".parse::<SortKey>().unwrap(), SortKey::Popularity);
        assert_eq!("start_date".parse::<SortKey>().unwrap(), SortKey::StartDate);
        assert!("episode_count".parse::<SortKey>().is_err());
    }

    #[test]
    fn status_accepts_provider_spellings() {
        assert_eq!("currently_airing".parse::<AiringStatus>().unwrap(), AiringStatus::Airing);
        assert_eq!("current".parse::<AiringStatus>().unwrap(), AiringStatus::Airing);
        assert_eq!("finished_airing".parse::<AiringStatus>().unwrap(), AiringStatus::Finished);
    }

    #[test]
    fn offset_is_zero_based() {
        let q = BrowseQuery { page: 3, limit: 24, ..Default::default() };
        assert_eq!(q.offset(), 48);
        let first = BrowseQuery { page: 1, limit: 24, ..Default::default() };
        assert_eq!(first.offset(), 0);
        let clamped = BrowseQuery { page: 0, limit: 24, ..Default::default() };
        assert_eq!(clamped.offset(), 0);
        let extreme = BrowseQuery { page: u32::MAX, limit: 24, ..Default::default() };
        assert_eq!(extreme.offset(), u32::MAX);
    }

    #[test]
    fn defaults_match_browse_entry_point() {
        let q = BrowseQuery::default();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 24);
        assert_eq!(q.sort, SortKey::Score);
        assert_eq!(q.direction, SortDirection::Desc);
    }
}
