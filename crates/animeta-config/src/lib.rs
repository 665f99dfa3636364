pub mod config;
pub mod paths;

pub use config::{
    AnilistConfig, Config, FetchOptions, KitsuConfig, LoggingConfig, MalConfig, KNOWN_PROVIDERS,
};
pub use paths::PathManager;
