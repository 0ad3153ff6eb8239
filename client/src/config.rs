use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use dotenvy::dotenv;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Root of the REST routes, e.g. `http://localhost:7890/api`.
    pub base_url: String,
    /// Origin that cover image paths are relative to.
    pub asset_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SessionConfig {
    /// Where the signed-in session is kept between runs. Nothing is stored
    /// when unset.
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FrontendConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            api: ApiConfig {
                base_url: "http://localhost:7890/api".to_string(),
                asset_base_url: "http://localhost:7890".to_string(),
                timeout_secs: 30,
            },
            session: SessionConfig::default(),
        }
    }
}

impl FrontendConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(FrontendConfig::default()))
            .merge(Toml::file("Frontend.toml"))
            .merge(Env::prefixed("LIBRARY_").split("__")) // e.g., LIBRARY_API__BASE_URL
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        dotenv().ok();

        let config: Self = Self::figment().extract()?;

        tracing::info!(
            "Configuration loaded, API at {} (assets at {})",
            config.api.base_url,
            config.api.asset_base_url
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_point_at_local_api() {
        Jail::expect_with(|_jail| {
            let config: FrontendConfig = FrontendConfig::figment().extract()?;
            assert_eq!(config, FrontendConfig::default());
            assert_eq!(config.api.base_url, "http://localhost:7890/api");
            assert_eq!(config.session.store_path, None);
            Ok(())
        });
    }

    #[test]
    fn toml_file_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "Frontend.toml",
                r#"
                [api]
                base_url = "https://library.example.com/api"
                timeout_secs = 5

                [session]
                store_path = "session.json"
                "#,
            )?;
            jail.set_env("LIBRARY_API__ASSET_BASE_URL", "https://cdn.example.com");

            let config: FrontendConfig = FrontendConfig::figment().extract()?;
            assert_eq!(config.api.base_url, "https://library.example.com/api");
            assert_eq!(config.api.asset_base_url, "https://cdn.example.com");
            assert_eq!(config.api.timeout_secs, 5);
            assert_eq!(config.session.store_path, Some(PathBuf::from("session.json")));
            Ok(())
        });
    }
}
