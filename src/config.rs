use crate::error::{Error, Result};
use crate::models::posting::Language;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub telegram_bot_token: String,
    pub telegram_api_url: String,
    pub channel_id: i64,
    pub admin_telegram_ids: Vec<i64>,
    pub posting_max_age_days: u32,
    pub expiry_sweep_interval_secs: u64,
    pub default_language: Language,
    pub webapp_url: Option<String>,
    pub telegram_webhook_secret: Option<String>,
    pub support_contacts: Vec<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);
        Ok(Self {
            server_address: vars.required("SERVER_ADDRESS")?,
            database_url: vars.required("DATABASE_URL")?,
            database_max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            telegram_bot_token: vars.required("TELEGRAM_BOT_TOKEN")?,
            telegram_api_url: vars
                .optional("TELEGRAM_API_URL")
                .unwrap_or_else(|| "https://api.telegram.org".to_string()),
            channel_id: vars.required_parse("CHANNEL_ID")?,
            admin_telegram_ids: parse_admin_ids(
                vars.optional("ADMIN_TELEGRAM_IDS").as_deref().unwrap_or(""),
            ),
            posting_max_age_days: vars.parse_or("POSTING_MAX_AGE_DAYS", 40)?,
            expiry_sweep_interval_secs: vars.parse_or("EXPIRY_SWEEP_INTERVAL_SECS", 3600)?,
            default_language: vars.parse_or("DEFAULT_LANGUAGE", Language::En)?,
            webapp_url: vars
                .optional("WEBAPP_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            telegram_webhook_secret: vars.optional("TELEGRAM_WEBHOOK_SECRET"),
            support_contacts: parse_contacts(
                vars.optional("SUPPORT_CONTACTS").as_deref().unwrap_or("@BridgeJob"),
            ),
        })
    }

    pub fn is_admin(&self, telegram_id: i64) -> bool {
        self.admin_telegram_ids.contains(&telegram_id)
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank are treated the same.
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        self.optional(name)
            .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
    }

    fn required_parse<T>(&self, name: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.required(name)?;
        parse_value(name, &raw)
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(raw) => parse_value(name, &raw),
            None => Ok(default),
        }
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

/// Comma-separated Telegram ids; malformed entries are skipped.
fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(entry = part, "Ignoring malformed ADMIN_TELEGRAM_IDS entry");
                None
            }
        })
        .collect()
}

/// Handles shown by `/contact` and `/pricing`, e.g. `@alice, bob`.
fn parse_contacts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| format!("@{}", part.trim_start_matches('@')))
        .collect()
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("SERVER_ADDRESS", "0.0.0.0:8000"),
        ("DATABASE_URL", "postgres://localhost/bridgejob"),
        ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ("CHANNEL_ID", "-1001234567890"),
    ];

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.channel_id, -1001234567890);
        assert_eq!(config.posting_max_age_days, 40);
        assert_eq!(config.expiry_sweep_interval_secs, 3600);
        assert_eq!(config.default_language, Language::En);
        assert!(config.admin_telegram_ids.is_empty());
        assert!(config.webapp_url.is_none());
        assert!(config.telegram_webhook_secret.is_none());
        assert_eq!(config.support_contacts, vec!["@BridgeJob"]);
    }

    #[test]
    fn support_contacts_are_normalized_handles() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SUPPORT_CONTACTS", "@hr_lead, ops ,"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.support_contacts, vec!["@hr_lead", "@ops"]);
    }

    #[test]
    fn admin_ids_skip_malformed_entries() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ADMIN_TELEGRAM_IDS", "42, nope,,7 "));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.admin_telegram_ids, vec![42, 7]);
        assert!(config.is_admin(7));
        assert!(!config.is_admin(8));
    }

    #[test]
    fn missing_or_invalid_required_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&REQUIRED[..3])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("CHANNEL_ID")));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("DEFAULT_LANGUAGE", "de"));
        assert!(matches!(
            Config::from_lookup(lookup(&pairs)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn webapp_url_loses_trailing_slash() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("WEBAPP_URL", "https://bot.example/"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.webapp_url.as_deref(), Some("https://bot.example"));
    }
}
