use crate::anilist::AnilistClient;
use crate::kitsu::KitsuClient;
use crate::mal::MalClient;
use crate::traits::AnimeProvider;
use animeta_config::Config;
use tracing::{debug, warn};

/// Builds the live provider chain from configuration, in fallback order.
/// Unusable providers are simply absent; the resulting list may be empty,
/// in which case consumers fall through to the bundled dataset directly.
pub struct ProviderRegistry;

impl ProviderRegistry {
    pub fn build(config: &Config) -> Vec<Box<dyn AnimeProvider>> {
        let mut providers: Vec<Box<dyn AnimeProvider>> = Vec::new();
        for name in config.configured_providers() {
            match name.as_str() {
                "mal" => {
                    let mal = config.mal.clone().unwrap_or_default();
                    providers.push(Box::new(MalClient::new(
                        mal.client_id,
                        mal.client_secret,
                        &config.fetch,
                    )));
                }
                "anilist" => providers.push(Box::new(AnilistClient::new())),
                "kitsu" => {
                    let kitsu = config.kitsu.clone().unwrap_or_default();
                    providers.push(Box::new(KitsuClient::new(
                        kitsu.client_id,
                        kitsu.client_secret,
                    )));
                }
                other => warn!(provider = other, "unknown provider in fallback order, skipping"),
            }
        }
        debug!(
            providers = ?providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "provider chain assembled"
        );
        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animeta_config::MalConfig;

    #[test]
    fn default_config_skips_unconfigured_primary() {
        let config = Config::default();
        let providers = ProviderRegistry::build(&config);
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["anilist", "kitsu"]);
    }

    #[test]
    fn configured_primary_leads_the_chain() {
        let mut config = Config::default();
        config.mal = Some(MalConfig {
            enabled: true,
            client_id: "abc123".to_string(),
            client_secret: String::new(),
        });
        let providers = ProviderRegistry::build(&config);
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["mal", "anilist", "kitsu"]);
    }

    #[test]
    fn fallback_order_is_respected() {
        let mut config = Config::default();
        config.fetch.fallback_order = "kitsu,anilist".to_string();
        let providers = ProviderRegistry::build(&config);
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["kitsu", "anilist"]);
    }
}
