use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub db_pool_size: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            db_pool_size: parse_pool_size(std::env::var("DB_POOL_SIZE").ok())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_pool_size(raw: Option<String>) -> Result<u32> {
    let size = match raw {
        None => return Ok(10),
        Some(v) => v
            .parse::<u32>()
            .context("DB_POOL_SIZE must be a positive integer")?,
    };
    if size == 0 {
        anyhow::bail!("DB_POOL_SIZE must be at least 1");
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::parse_pool_size;

    #[test]
    fn pool_size_defaults_when_unset() {
        assert_eq!(parse_pool_size(None).unwrap(), 10);
    }

    #[test]
    fn pool_size_parses_explicit_value() {
        assert_eq!(parse_pool_size(Some("25".to_string())).unwrap(), 25);
    }

    #[test]
    fn pool_size_rejects_zero_and_garbage() {
        assert!(parse_pool_size(Some("0".to_string())).is_err());
        assert!(parse_pool_size(Some("lots".to_string())).is_err());
        assert!(parse_pool_size(Some("-3".to_string())).is_err());
    }
}
