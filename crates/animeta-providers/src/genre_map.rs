//! Cross-provider genre mapping.
//!
//! The canonical catalog uses the primary provider's genre ids. The other
//! two upstreams have no shared taxonomy, so this table records the closest
//! term each of them accepts per canonical id. The mapping is approximate
//! and lossy: where a provider simply has no such genre the entry is `None`
//! and the adapter drops the filter for that provider.

use animeta_models::canonical_genre_name;

/// Bumped whenever an entry changes, so a surprising filter result can be
/// traced to a specific revision of this table.
pub const GENRE_MAPPING_VERSION: &str = "2024.1";

/// Explicit `(provider, canonical id) -> provider term` lookup table.
#[derive(Debug, Default)]
pub struct GenreMapping;

impl GenreMapping {
    pub fn new() -> Self {
        Self
    }

    pub fn version(&self) -> &'static str {
        GENRE_MAPPING_VERSION
    }

    /// The genre term `provider` accepts for a canonical catalog id, if it
    /// has one.
    pub fn provider_term(&self, provider: &str, canonical_id: u32) -> Option<&'static str> {
        match provider {
            "mal" => canonical_genre_name(canonical_id),
            "anilist" => anilist_term(canonical_id),
            "kitsu" => kitsu_term(canonical_id),
            _ => None,
        }
    }
}

/// AniList's genre collection is a flat string list. It has no demographic
/// genres and files magic under "Mahou Shoujo", which is the nearest term
/// it accepts.
fn anilist_term(canonical_id: u32) -> Option<&'static str> {
    match canonical_id {
        1 => Some("Action"),
        2 => Some("Adventure"),
        3 => Some("Comedy"),
        4 => Some("Drama"),
        5 => Some("Slice of Life"),
        6 => Some("Fantasy"),
        7 => Some("Mahou Shoujo"),
        8 => Some("Supernatural"),
        9 => Some("Horror"),
        10 => Some("Mystery"),
        11 => Some("Psychological"),
        12 => Some("Romance"),
        13 => Some("Sci-Fi"),
        14 => Some("Mecha"),
        15 => Some("Sports"),
        16 => Some("Music"),
        // Shounen/Shoujo/Seinen/Josei are demographics, not genres, on this
        // provider. No usable filter term.
        17..=20 => None,
        _ => None,
    }
}

/// Kitsu's genre catalog carries demographic genres too, so all twenty
/// canonical ids resolve.
fn kitsu_term(canonical_id: u32) -> Option<&'static str> {
    match canonical_id {
        1 => Some("Action"),
        2 => Some("Adventure"),
        3 => Some("Comedy"),
        4 => Some("Drama"),
        5 => Some("Slice of Life"),
        6 => Some("Fantasy"),
        7 => Some("Magic"),
        8 => Some("Supernatural"),
        9 => Some("Horror"),
        10 => Some("Mystery"),
        11 => Some("Psychological"),
        12 => Some("Romance"),
        13 => Some("Science Fiction"),
        14 => Some("Mecha"),
        15 => Some("Sports"),
        16 => Some("Music"),
        17 => Some("Shounen"),
        18 => Some("Shoujo"),
        19 => Some("Seinen"),
        20 => Some("Josei"),
        _ => None,
    }
}
