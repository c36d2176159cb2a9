/// Application configuration module
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub nasa_api_url: String,
    pub nasa_api_key: String,
    pub cache_path: PathBuf,
    pub static_dir: PathBuf,
    pub http_timeout: Duration,
    pub refresh: RefreshSettings,
}

/// Knobs for the daily refresh
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Sols drawn per inactive rover before giving up
    pub sol_sample_attempts: u32,
    /// Photos a sampled sol must return for an inactive rover
    pub min_inactive_photos: usize,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            sol_sample_attempts: 10,
            min_inactive_photos: 25,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let nasa_api_key = env::var("NASA_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("NASA_API_KEY not set, falling back to DEMO_KEY");
            "DEMO_KEY".to_string()
        });

        let nasa_api_url = env::var("NASA_API_URL")
            .unwrap_or_else(|_| "https://api.nasa.gov".to_string())
            .trim_end_matches('/')
            .to_string();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", raw, e))?,
            Err(_) => 3000,
        };

        let defaults = RefreshSettings::default();
        let refresh = RefreshSettings {
            sol_sample_attempts: env_u64(
                "SOL_SAMPLE_ATTEMPTS",
                defaults.sol_sample_attempts as u64,
            )
            .max(1) as u32,
            min_inactive_photos: env_u64(
                "MIN_INACTIVE_PHOTOS",
                defaults.min_inactive_photos as u64,
            ) as usize,
        };

        Ok(Self {
            port,
            nasa_api_url,
            nasa_api_key,
            cache_path: env_path("CACHE_PATH", "red_planet_gallery.json"),
            static_dir: env_path("STATIC_DIR", "public"),
            http_timeout: Duration::from_secs(env_u64("HTTP_TIMEOUT_SECONDS", 30)),
            refresh,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_u64_default_when_missing() {
        assert_eq!(env_u64("RPG_TEST_MISSING_U64", 7), 7);
    }

    #[test]
    fn test_env_u64_parses_value() {
        env::set_var("RPG_TEST_PARSED_U64", "42");
        assert_eq!(env_u64("RPG_TEST_PARSED_U64", 7), 42);
    }

    #[test]
    fn test_env_u64_ignores_garbage() {
        env::set_var("RPG_TEST_GARBAGE_U64", "forty-two");
        assert_eq!(env_u64("RPG_TEST_GARBAGE_U64", 7), 7);
    }

    #[test]
    fn test_env_path_blank_uses_default() {
        env::set_var("RPG_TEST_BLANK_PATH", "  ");
        assert_eq!(
            env_path("RPG_TEST_BLANK_PATH", "public"),
            PathBuf::from("public")
        );
    }

    #[test]
    fn test_refresh_settings_default() {
        let settings = RefreshSettings::default();
        assert_eq!(settings.sol_sample_attempts, 10);
        assert_eq!(settings.min_inactive_photos, 25);
    }
}
