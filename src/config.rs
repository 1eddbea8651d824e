#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();

        let database_url = env_required("DATABASE_URL")?;

        let max_connections: u32 = env_or("USERBASE_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid USERBASE_MAX_CONNECTIONS: {e}"))?;

        Ok(StoreConfig {
            database_url,
            max_connections,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
