//! Minimal Telegram Bot API gateway: long-poll `getUpdates`, reply with
//! `sendMessage`.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use weather_core::{Reply, Router};

/// Pause after a failed poll before trying again.
const RETRY_PAUSE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct TelegramApi {
    base_url: String,
    http: Client,
    retry_pause: Duration,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

impl TelegramApi {
    /// `poll_timeout` is the long-poll wait; the HTTP timeout is set above it.
    pub fn new(base_url: &str, token: &str, poll_timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client for Telegram")?;

        Ok(Self {
            base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), token),
            http,
            retry_pause: RETRY_PAUSE,
        })
    }

    #[cfg(test)]
    fn with_retry_pause(mut self, retry_pause: Duration) -> Self {
        self.retry_pause = retry_pause;
        self
    }

    async fn call<B: Serialize, T: DeserializeOwned>(&self, method: &str, body: &B) -> Result<T> {
        let res = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send Telegram {method} request"))?;

        let status = res.status();
        let parsed: ApiResponse<T> = res
            .json()
            .await
            .with_context(|| format!("Failed to parse Telegram {method} response"))?;

        match (parsed.ok, parsed.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(anyhow!(
                "Telegram {method} failed with status {status}: {}",
                parsed.description.unwrap_or_default()
            )),
        }
    }

    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &serde_json::json!({
                "offset": offset,
                "timeout": timeout.as_secs(),
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let body = SendMessage {
            chat_id,
            text: &reply.text,
            parse_mode: reply.html.then_some("HTML"),
        };

        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }
}

/// Route one update and send the reply. Non-text updates are ignored.
pub async fn dispatch(api: &TelegramApi, router: &Router, update: Update) -> Result<()> {
    let Some(Message { chat, text: Some(text) }) = update.message else {
        tracing::debug!(update_id = update.update_id, "ignoring non-text update");
        return Ok(());
    };

    let reply = router.handle(&text).await;
    api.send_message(chat.id, &reply)
        .await
        .with_context(|| format!("Failed to reply to chat {}", chat.id))
}

/// Long-poll until the task is cancelled. Each message is handled in its own
/// task so slow upstream calls do not hold up the loop.
pub async fn run(api: TelegramApi, router: Router, poll_timeout: Duration) -> Result<()> {
    let mut offset = 0;
    tracing::info!("polling for updates");

    loop {
        let updates = match api.get_updates(offset, poll_timeout).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!(error = %err, "getUpdates failed");
                tokio::time::sleep(api.retry_pause).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let api = api.clone();
            let router = router.clone();
            tokio::spawn(async move {
                if let Err(err) = dispatch(&api, &router, update).await {
                    tracing::warn!(error = %err, "dispatch failed");
                }
            });
        }
    }
}
