use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use tokio::time::timeout;
use tracing::debug;

use common::notify::{Notifier, NotifyError};

use crate::config::TelegramConfig;

/// Hard cap on one send attempt. A slow Telegram API must never stall an
/// evaluation pass.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(config.token.clone()),
            chat_id: ChatId(config.chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        debug!("Sending Telegram message to chat {}", self.chat_id.0);

        let send = self.bot.send_message(self.chat_id, text.to_owned());
        match timeout(SEND_TIMEOUT, send).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(NotifyError::Send(e.to_string())),
            Err(_) => Err(NotifyError::Timeout),
        }
    }
}
