use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use weather_core::{Config, Locale, Router, provider_from_config};

use crate::telegram::{self, TelegramApi};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-bot", version, about = "Telegram weather bot")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start polling the chat platform and answering messages.
    Run,

    /// Route one message through the bot and print the reply.
    Ask {
        /// Message text, e.g. "Москва прогноз".
        text: String,
    },

    /// Interactively store the chat token, API key and reply language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Run => {
                let config = Config::load_from(&path)?.apply_env();
                let token = config.validate()?;

                let router = router_from_config(&config)?;
                let poll_timeout = Duration::from_secs(config.poll_timeout_secs);
                let api = TelegramApi::new(&config.telegram_base_url, token, poll_timeout)?;

                tracing::info!(language = %config.language, "starting bot");
                tokio::select! {
                    res = telegram::run(api, router, poll_timeout) => res?,
                    res = tokio::signal::ctrl_c() => {
                        res.context("Failed to listen for shutdown signal")?;
                        tracing::info!("shutting down");
                    }
                }
            }
            Command::Ask { text } => {
                let config = Config::load_from(&path)?.apply_env();
                let router = router_from_config(&config)?;
                let reply = router.handle(&text).await;
                println!("{}", reply.text);
            }
            Command::Configure => configure(&path)?,
        }

        Ok(())
    }
}

fn router_from_config(config: &Config) -> anyhow::Result<Router> {
    let provider = provider_from_config(config)?;
    Ok(Router::new(Arc::new(provider), config.language))
}

fn configure(path: &std::path::Path) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;

    let token = Password::new("Telegram bot token:")
        .without_confirmation()
        .prompt()
        .context("Failed to read bot token")?;
    let api_key = Text::new("OpenWeather API key:")
        .prompt()
        .context("Failed to read API key")?;
    let language = Select::new("Reply language:", vec![Locale::Ru, Locale::En])
        .prompt()
        .context("Failed to read language")?;

    if !token.trim().is_empty() {
        config.telegram_token = Some(token.trim().to_string());
    }
    if !api_key.trim().is_empty() {
        config.openweather_api_key = Some(api_key.trim().to_string());
    }
    config.language = language;

    config.save_to(path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
