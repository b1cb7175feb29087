use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_EVAL_INTERVAL_SECS: u64 = 3600;

/// Telegram credentials pulled from the environment. Both drivers refuse to
/// start without them.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: i64,
}

impl TelegramConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let token =
            env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN not set in .env")?;
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID not set in .env")?
            .parse::<i64>()
            .context("TELEGRAM_CHAT_ID must be a number")?;

        Ok(Self { token, chat_id })
    }
}

/// Seconds between evaluation passes, overridable through
/// `EVAL_INTERVAL_SECS`. Defaults to one hour.
pub fn eval_interval() -> Duration {
    let secs = env::var("EVAL_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_EVAL_INTERVAL_SECS);

    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so every case lives in one
    // test to keep them from racing each other.
    #[test]
    fn test_config_from_env() {
        unsafe {
            env::set_var("TELEGRAM_BOT_TOKEN", "123:abc");
            env::set_var("TELEGRAM_CHAT_ID", "-100200300");
        }
        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.token, "123:abc");
        assert_eq!(config.chat_id, -100200300);

        unsafe {
            env::set_var("TELEGRAM_CHAT_ID", "not-a-number");
        }
        assert!(TelegramConfig::from_env().is_err());

        unsafe {
            env::remove_var("TELEGRAM_BOT_TOKEN");
        }
        assert!(TelegramConfig::from_env().is_err());

        unsafe {
            env::remove_var("EVAL_INTERVAL_SECS");
        }
        assert_eq!(eval_interval(), Duration::from_secs(3600));

        unsafe {
            env::set_var("EVAL_INTERVAL_SECS", "90");
        }
        assert_eq!(eval_interval(), Duration::from_secs(90));

        unsafe {
            env::set_var("EVAL_INTERVAL_SECS", "soon");
        }
        assert_eq!(eval_interval(), Duration::from_secs(3600));

        unsafe {
            env::remove_var("EVAL_INTERVAL_SECS");
            env::remove_var("TELEGRAM_CHAT_ID");
        }
    }
}
