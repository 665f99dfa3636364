use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Provider names recognized in `fallback_order`.
pub const KNOWN_PROVIDERS: [&str; 3] = ["mal", "anilist", "kitsu"];

/// Credential values that mean "not configured yet".
const PLACEHOLDER_CREDENTIALS: [&str; 3] = ["YOUR_CLIENT_ID", "YOUR_CLIENT_SECRET", "your_client_id_here"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mal: Option<MalConfig>,
    #[serde(default)]
    pub anilist: Option<AnilistConfig>,
    #[serde(default)]
    pub kitsu: Option<KitsuConfig>,
    #[serde(default)]
    pub fetch: FetchOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub client_id: String,
    /// Optional: catalog endpoints work with the client id header alone.
    /// When set, a client-credentials token is attached as well.
    #[serde(default)]
    pub client_secret: String,
}

impl Default for MalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id: "YOUR_CLIENT_ID".to_string(),
            client_secret: String::new(),
        }
    }
}

/// The GraphQL provider needs no credentials; the section only exists so it
/// can be switched off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnilistConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AnilistConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitsuConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional: the public catalog works unauthenticated.
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl Default for KitsuConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Comma-separated provider priority, e.g. "mal,anilist,kitsu".
    #[serde(default = "default_fallback_order")]
    pub fallback_order: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            fallback_order: default_fallback_order(),
            page_limit: default_page_limit(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl FetchOptions {
    /// Fallback order as individual provider names, trimmed.
    pub fn fallback_providers(&self) -> Vec<String> {
        self.fallback_order
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_fallback_order() -> String {
    "mal,anilist,kitsu".to_string()
}

fn default_page_limit() -> u32 {
    24
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn is_placeholder_credential(value: &str) -> bool {
    value.is_empty() || PLACEHOLDER_CREDENTIALS.contains(&value)
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise start from defaults.
    /// Environment overrides are applied either way.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Environment variables win over file contents.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ANIMETA_MAL_CLIENT_ID") {
            self.mal.get_or_insert_with(MalConfig::default).client_id = v;
        }
        if let Ok(v) = std::env::var("ANIMETA_MAL_CLIENT_SECRET") {
            self.mal.get_or_insert_with(MalConfig::default).client_secret = v;
        }
        if let Ok(v) = std::env::var("ANIMETA_KITSU_CLIENT_ID") {
            self.kitsu.get_or_insert_with(KitsuConfig::default).client_id = v;
        }
        if let Ok(v) = std::env::var("ANIMETA_KITSU_CLIENT_SECRET") {
            self.kitsu.get_or_insert_with(KitsuConfig::default).client_secret = v;
        }
        if let Ok(v) = std::env::var("ANIMETA_FALLBACK_ORDER") {
            self.fetch.fallback_order = v;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let providers = self.fetch.fallback_providers();
        if providers.is_empty() {
            return Err(anyhow::anyhow!("fallback_order cannot be empty"));
        }
        for provider in &providers {
            if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
                return Err(anyhow::anyhow!(
                    "Unknown provider '{}' in fallback_order (known: {})",
                    provider,
                    KNOWN_PROVIDERS.join(", ")
                ));
            }
        }
        if self.fetch.page_limit == 0 {
            return Err(anyhow::anyhow!("page_limit must be at least 1"));
        }
        Ok(())
    }

    /// The catalog endpoints need a real client id; placeholder values mean
    /// the adapter would only produce auth failures, so it is treated as
    /// unconfigured and the chain skips straight past it.
    pub fn is_mal_configured(&self) -> bool {
        match &self.mal {
            Some(mal) => mal.enabled && !is_placeholder_credential(&mal.client_id),
            None => false,
        }
    }

    pub fn is_anilist_configured(&self) -> bool {
        self.anilist.as_ref().map(|a| a.enabled).unwrap_or(true)
    }

    /// Kitsu's public catalog works without credentials, so the section only
    /// gates the adapter when explicitly disabled.
    pub fn is_kitsu_configured(&self) -> bool {
        self.kitsu.as_ref().map(|k| k.enabled).unwrap_or(true)
    }

    pub fn is_kitsu_authenticated(&self) -> bool {
        match &self.kitsu {
            Some(kitsu) => {
                !is_placeholder_credential(&kitsu.client_id)
                    && !is_placeholder_credential(&kitsu.client_secret)
            }
            None => false,
        }
    }

    /// The fallback order filtered down to providers that are actually
    /// usable. The bundled placeholder dataset is not listed here; it always
    /// terminates the chain and cannot be disabled.
    pub fn configured_providers(&self) -> Vec<String> {
        self.fetch
            .fallback_providers()
            .into_iter()
            .filter(|name| match name.as_str() {
                "mal" => self.is_mal_configured(),
                "anilist" => self.is_anilist_configured(),
                "kitsu" => self.is_kitsu_configured(),
                _ => false,
            })
            .collect()
    }
}
