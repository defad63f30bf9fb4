use anyhow::{Context, Result};

/// Fallback used when a waiter has no phone on record. Matches the number
/// the menu client shipped with.
const DEFAULT_FALLBACK_WHATSAPP_NUMBER: &str = "5511999999999";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub fallback_whatsapp_number: String,
}

pub fn load() -> Result<Config> {
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable is not set")?;

    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
        Err(_) => 3000,
    };

    let fallback_whatsapp_number = std::env::var("FALLBACK_WHATSAPP_NUMBER")
        .unwrap_or_else(|_| DEFAULT_FALLBACK_WHATSAPP_NUMBER.to_string());

    Ok(Config {
        database_url,
        port,
        fallback_whatsapp_number,
    })
}
