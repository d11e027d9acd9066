use std::env;
use std::path::PathBuf;

const DEFAULT_JWT_SECRET: &str = "mysecretsshhhhh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub mongodb_uri: String,
    pub client_dist: PathBuf,
    pub client_origin: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => 3001,
        };

        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("⚠️  JWT_SECRET not set, using the built-in development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let jwt = JwtConfig {
            secret,
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(2),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            environment: Environment::from_node_env(env::var("NODE_ENV").ok().as_deref()),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/googlebooks".to_string()),
            client_dist: env::var("CLIENT_DIST")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("../client/dist")),
            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            jwt,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Settings for tests and local tooling: development mode, fixed secret.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Development,
            mongodb_uri: "mongodb://127.0.0.1:27017/googlebooks_test".to_string(),
            client_dist: PathBuf::from("client/dist"),
            client_origin: "http://localhost:3000".to_string(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 2,
            },
        }
    }
}
