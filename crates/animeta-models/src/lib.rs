pub mod genre;
pub mod page;
pub mod query;
pub mod record;

pub use genre::{canonical_genre_name, canonical_genres, Genre, CANONICAL_GENRE_NAMES};
pub use page::Page;
pub use query::{AiringStatus, BrowseQuery, SortDirection, SortKey};
pub use record::{
    display_year, is_recent_release, truncate_description, AnimeRecord, IMAGE_PLACEHOLDER,
    MOCK_ID_SEPARATOR, NO_DESCRIPTION, UNKNOWN_RATING,
};
