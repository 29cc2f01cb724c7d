//! Shared configuration.

/// Process-wide configuration, loaded once at startup.
///
/// The JWT secret is mandatory: it is handed to the token service at
/// construction and never read from the environment again. Rotating it
/// invalidates every outstanding token.
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./newsdesk.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        Ok(Self {
            database_path,
            port,
            jwt_secret,
        })
    }
}
