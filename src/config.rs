use std::{
    env,
    net::{IpAddr, SocketAddr},
};

use anyhow::Context;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Storefront origin allowed by CORS; any origin when unset.
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let cors_origin = env::var("CORS_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty());

        Ok(Self {
            database_url,
            host,
            port,
            cors_origin,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .with_context(|| format!("APP_HOST `{}` is not an IP address", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
