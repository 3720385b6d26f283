use crate::modules::serveme::gateway::RegionKeys;

/// Startup configuration, read from the environment exactly once. The NA key
/// is required; regional keys fall back to it when unset. No Debug: the
/// token and keys stay out of log output.
#[derive(Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub serveme_keys: RegionKeys,
}

impl BotConfig {
    pub fn from_env() -> Self {
        let discord_token = std::env::var("DISCORD_TOKEN").expect("missing DISCORD_TOKEN");
        let na = std::env::var("SERVEME_API_KEY_NA").expect("missing SERVEME_API_KEY_NA");

        let serveme_keys = RegionKeys::new(
            na,
            std::env::var("SERVEME_API_KEY_EU").ok(),
            std::env::var("SERVEME_API_KEY_SEA").ok(),
            std::env::var("SERVEME_API_KEY_AU").ok(),
        );

        Self {
            discord_token,
            serveme_keys,
        }
    }
}
