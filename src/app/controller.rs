//! Main app loop: reads commands from a channel, drives the session and
//! writes back the resulting screen.

use std::sync::Arc;

use futures::StreamExt;

use crate::app::command::{Command, CommandParser, HELP};
use crate::app::render;
use crate::channels::{Channel, IncomingMessage, OutgoingResponse, StatusUpdate};
use crate::config::AppConfig;
use crate::error::Error;
use crate::invest::Confirmation;
use crate::onboarding::Advance;
use crate::session::{Session, Stage};

/// The app: one channel, one session.
pub struct App {
    config: AppConfig,
    channel: Arc<dyn Channel>,
    session: Session,
}

impl App {
    pub fn new(config: AppConfig, channel: Arc<dyn Channel>) -> Self {
        let session = Session::new(config.user_name.clone());
        Self {
            config,
            channel,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the input ends, `/quit`, or Ctrl+C.
    pub async fn run(&mut self) -> Result<(), Error> {
        let mut message_stream = self.channel.start().await?;

        tracing::info!(channel = self.channel.name(), "MASAR ready");
        self.send(
            &IncomingMessage::new(self.channel.name(), "system", ""),
            render::screen(&self.session),
        )
        .await;

        loop {
            let message = tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received, shutting down...");
                    break;
                }
                msg = message_stream.next() => {
                    match msg {
                        Some(m) => m,
                        None => {
                            tracing::info!("Input stream ended, shutting down...");
                            break;
                        }
                    }
                }
            };

            match self.handle_message(&message).await {
                Ok(Some(response)) if !response.is_empty() => {
                    self.send(&message, response).await;
                }
                Ok(Some(_)) => {
                    // Nothing to show
                }
                Ok(None) => {
                    tracing::info!("Quit command received, exiting...");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Command failed");
                    self.send(&message, format!("Error: {}", e)).await;
                }
            }
        }

        self.channel.shutdown().await?;
        Ok(())
    }

    async fn send(&self, message: &IncomingMessage, content: String) {
        if let Err(e) = self
            .channel
            .respond(message, OutgoingResponse::text(content))
            .await
        {
            tracing::warn!(error = %e, "Failed to send response");
        }
    }

    /// Handle one input line. `Ok(None)` means quit.
    pub async fn handle_message(
        &mut self,
        message: &IncomingMessage,
    ) -> Result<Option<String>, Error> {
        let command = CommandParser::parse(&message.content);
        tracing::debug!(
            channel = %message.channel,
            command = ?command,
            stage = %self.session.stage(),
            "Received command"
        );

        let output = match command {
            Command::Quit => return Ok(None),
            Command::Help => HELP.to_string(),
            Command::State => serde_json::to_string_pretty(&self.session.snapshot())
                .unwrap_or_else(|e| format!("Failed to serialize session: {e}")),
            Command::Invalid { usage } => format!("Usage: {usage}"),

            Command::Start => {
                self.session.start()?;
                render::screen(&self.session)
            }
            Command::Select(n) => {
                self.session.select_answer(n)?;
                render::screen(&self.session)
            }
            Command::Next => match self.session.stage() {
                Stage::Main => self.confirm()?,
                _ => match self.session.next()? {
                    Advance::Completed(_) => format!(
                        "{}\n\n{}",
                        render::onboarding(self.session.onboarding()),
                        render::screen(&self.session)
                    ),
                    Advance::Step(_) => render::screen(&self.session),
                },
            },
            Command::Back => {
                self.session.back()?;
                render::screen(&self.session)
            }
            Command::Tab(tab) => {
                self.session.open_tab(tab)?;
                render::screen(&self.session)
            }
            Command::Product(id) => {
                self.session.select_product(&id)?;
                render::screen(&self.session)
            }
            Command::Invest => {
                self.session.start_investing()?;
                render::screen(&self.session)
            }
            Command::More => {
                self.session.invest_flow_mut()?.increment()?;
                render::screen(&self.session)
            }
            Command::Less => {
                self.session.invest_flow_mut()?.decrement()?;
                render::screen(&self.session)
            }
            Command::Amount(amount) => {
                self.session.invest_flow_mut()?.set_amount(amount)?;
                render::screen(&self.session)
            }
            Command::Preset(index) => {
                self.session.invest_flow_mut()?.set_preset(index)?;
                render::screen(&self.session)
            }
            Command::Confirm => self.confirm()?,
            Command::Range(range) => {
                self.session.set_time_range(range)?;
                render::screen(&self.session)
            }
            Command::Timeframe(timeframe) => {
                self.session.set_timeframe(timeframe)?;
                render::screen(&self.session)
            }
            Command::TierNext => render::wealth_tier(self.session.next_tier()?),
            Command::TierPrev => render::wealth_tier(self.session.prev_tier()?),
            Command::Advisors => render::advisors(),
            Command::Chat => render::chat_message(self.session.open_chat()?),
            Command::Go => match self.session.follow_advisor_action()? {
                Some(_) => render::screen(&self.session),
                None => "The advisor has no suggested action right now.".to_string(),
            },
            Command::Logout => {
                self.session.logout();
                render::screen(&self.session)
            }
            Command::Ask(text) => self.ask(message, &text).await?,
            Command::Text(text) => {
                if self.session.stage() == Stage::Main {
                    self.ask(message, &text).await?
                } else {
                    "Unknown command. Type /help for the list of commands.".to_string()
                }
            }
        };
        Ok(Some(output))
    }

    fn confirm(&mut self) -> Result<String, Error> {
        match self.session.confirm_investment()? {
            Confirmation::Step(_) => Ok(render::screen(&self.session)),
            Confirmation::Finished(receipt) => Ok(format!(
                "Investment of {} in {} is processing (ref {}).\n\n{}",
                crate::format::format_currency(receipt.amount),
                receipt.product_name,
                receipt.id,
                render::screen(&self.session)
            )),
        }
    }

    async fn ask(&mut self, message: &IncomingMessage, text: &str) -> Result<String, Error> {
        self.session.open_chat()?;
        let delay = self.config.advisor_delay;
        if !delay.is_zero() {
            let _ = self
                .channel
                .send_status(
                    StatusUpdate::Thinking("Advisor is typing...".into()),
                    &message.metadata,
                )
                .await;
            tokio::time::sleep(delay).await;
        }
        Ok(match self.session.ask(text)? {
            Some(reply) => render::chat_message(reply),
            None => String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::ScriptedChannel;

    fn app() -> App {
        App::new(
            AppConfig::default(),
            Arc::new(ScriptedChannel::new(Vec::<String>::new())),
        )
    }

    async fn say(app: &mut App, line: &str) -> Result<Option<String>, Error> {
        app.handle_message(&IncomingMessage::new("scripted", "tester", line))
            .await
    }

    #[tokio::test]
    async fn quit_returns_none() {
        let mut app = app();
        assert!(say(&mut app, "/quit").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn text_before_onboarding_is_a_hint() {
        let mut app = app();
        let out = say(&mut app, "hello").await.unwrap().unwrap();
        assert!(out.contains("/help"));
    }

    #[tokio::test]
    async fn wrong_stage_is_an_error() {
        let mut app = app();
        let err = say(&mut app, "portfolio").await.unwrap_err();
        assert!(err.to_string().contains("preview"));
    }

    #[tokio::test]
    async fn completing_onboarding_shows_profile_then_home() {
        let mut app = app();
        for line in ["start", "next", "select 3", "next", "select 3", "next", "select 1"] {
            say(&mut app, line).await.unwrap();
        }
        let out = say(&mut app, "next").await.unwrap().unwrap();
        assert!(out.contains("Your risk profile: Growth"));
        assert!(out.contains("Good morning, Ahmed"));
    }

    #[tokio::test]
    async fn usage_for_bad_arguments() {
        let mut app = app();
        let out = say(&mut app, "preset many").await.unwrap().unwrap();
        assert_eq!(out, "Usage: preset <1-4>");
    }

    #[tokio::test]
    async fn state_dump_is_json() {
        let mut app = app();
        let out = say(&mut app, "/state").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["stage"], "preview");
    }
}
