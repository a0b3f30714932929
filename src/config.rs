use std::{env, time::Duration};

use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_url: String,
    pub db_ns: String,
    pub db_name: String,
    pub db_credentials: Option<(String, String)>,

    pub email_api_url: String,
    pub catalog_base_url: String,
    pub app_name: String,
    pub outbound_timeout: Duration,
    pub otp_sweep_interval: Option<Duration>,

    pub bind_host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let db_credentials = match (env::var("DB_USER"), env::var("DB_PASSWORD")) {
            (Ok(user), Ok(password)) => Some((user, password)),
            _ => None,
        };

        let sweep_secs: u64 = parse_or("OTP_SWEEP_INTERVAL_SECS", 300);

        Ok(Self {
            db_url: var_or("DB_URL", "mem://"),
            db_ns: var_or("DB_NS", "jstream"),
            db_name: var_or("DB_NAME", "music_app"),
            db_credentials,
            email_api_url: env::var("EMAIL_API_URL")
                .map_err(|_| Error::EnvVarError("EMAIL_API_URL not found".to_string()))?,
            catalog_base_url: var_or("CATALOG_BASE_URL", "https://saavn.dev/api"),
            app_name: var_or("APP_NAME", "JStream"),
            outbound_timeout: Duration::from_secs(parse_or("OUTBOUND_TIMEOUT_SECS", 10)),
            otp_sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
            bind_host: var_or("BIND_HOST", "0.0.0.0"),
            port: parse_or("PORT", 8080),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
