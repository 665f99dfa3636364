//! Provider adapters for the anime catalog.
//!
//! Each upstream gets one adapter module that speaks its wire format and
//! normalizes every payload into [`animeta_models::AnimeRecord`]. The
//! adapters share a common [`AnimeProvider`] trait so the fallback chain
//! can treat them uniformly.

pub mod anilist;
pub mod error;
pub mod genre_map;
pub(crate) mod http;
pub mod kitsu;
pub mod mal;
pub mod registry;
pub mod relay;
pub mod token;
pub mod traits;

pub use anilist::AnilistClient;
pub use error::ProviderError;
pub use genre_map::{GenreMapping, GENRE_MAPPING_VERSION};
pub use kitsu::KitsuClient;
pub use mal::MalClient;
pub use registry::ProviderRegistry;
pub use relay::RelayRotation;
pub use token::{Clock, SystemClock, TokenCache, TokenGrant};
pub use traits::{with_cancel, AnimeProvider};
