use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5026,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/contacts".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: "change-me".to_string(),
                token_ttl_secs: 3600,
            },
            uploads: UploadsConfig {
                dir: PathBuf::from("./uploads"),
            },
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, then `contactserver.toml`, then
    /// `CONTACTSERVER_*` env vars (`__` separates sections, e.g.
    /// `CONTACTSERVER_SERVER__PORT`). `DATABASE_URL` wins over all of them.
    pub fn load() -> Result<Self, figment::Error> {
        let mut config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("contactserver.toml"))
            .merge(Env::prefixed("CONTACTSERVER_").split("__"))
            .extract()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.auth.jwt_secret == "change-me"
    }
}
