use serde::{Deserialize, Serialize};

/// Display genre: capitalized name plus a numeric id.
///
/// For the primary provider ids are its well-known catalog ids. For the
/// other providers the id is a locally invented 1-based index into whatever
/// deduplicated genre list the last fetch observed; those indices are NOT
/// stable identifiers and are recomputed on every load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// The primary provider's fixed genre catalog, in id order (id = index + 1).
pub const CANONICAL_GENRE_NAMES: [&str; 20] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Slice of Life",
    "Fantasy",
    "Magic",
    "Supernatural",
    "Horror",
    "Mystery",
    "Psychological",
    "Romance",
    "Sci-Fi",
    "Mecha",
    "Sports",
    "Music",
    "Shounen",
    "Shoujo",
    "Seinen",
    "Josei",
];

/// The full canonical catalog as display genres.
pub fn canonical_genres() -> Vec<Genre> {
    CANONICAL_GENRE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| Genre::new(idx as u32 + 1, *name))
        .collect()
}

/// Canonical genre name for a catalog id, if the id is in range.
pub fn canonical_genre_name(id: u32) -> Option<&'static str> {
    if id == 0 {
        return None;
    }
    CANONICAL_GENRE_NAMES.get(id as usize - 1).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_one_based() {
        let genres = canonical_genres();
        assert_eq!(genres.len(), 20);
        assert_eq!(genres[0], Genre::new(1, "Action"));
        assert_eq!(genres[19], Genre::new(20, "Josei"));
    }

    #[test]
    fn name_lookup_bounds() {
        assert_eq!(canonical_genre_name(5), Some("Slice of Life"));
        assert_eq!(canonical_genre_name(0), None);
        assert_eq!(canonical_genre_name(21), None);
    }
}
