//! # Command Handlers
//!
//! Turns an [`InboundEvent`] into reply text. Each verb maps to one
//! [`OrderService`] call; every failure becomes a plain-language reply so a
//! bad command never takes the process down.
//!
//! | Verb | Store access | Reply |
//! |------|--------------|-------|
//! | `/start` | none | greeting |
//! | `/help` | none | usage text |
//! | `/food <text>` | upsert | confirmation or usage prompt |
//! | `/reset` | remove | removed / nothing to remove |
//! | `/summary [YYYY-MM-DD]` | list | numbered summary or empty notice |

use crate::model::{Actor, Command, InboundEvent, OrderConfirmation, ResetOutcome, Summary};
use crate::service::{OrderError, OrderService};
use order_store::Day;
use tracing::{debug, error, info, warn};

pub const HELP_TEXT: &str = "Here's how to use me:\n\n\
    Place or update your order for today: /food <your food choice>\n\
    \x20  Example: /food Pizza Margherita\n\
    \x20  Using /food again today replaces your previous order.\n\n\
    Remove your order for today: /reset\n\n\
    See all orders placed today: /summary\n\
    \x20  Or for another day: /summary 2026-10-16\n\n\
    Show this help message: /help";

const FOOD_USAGE: &str = "Please tell me what food you want! Usage: /food <food name>";
const SUMMARY_USAGE: &str = "I couldn't read that date. Usage: /summary [YYYY-MM-DD]";
const UNRESOLVED_IDENTITY: &str = "Sorry, I couldn't tell who sent that command.";
const STORAGE_FAILURE: &str = "Sorry, the order list is unavailable right now. Please try again in a moment.";

/// Dispatches parsed commands to the [`OrderService`].
#[derive(Clone)]
pub struct CommandHandler {
    service: OrderService,
}

impl CommandHandler {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &OrderService {
        &self.service
    }

    /// Handles one inbound event.
    ///
    /// Returns `None` when the text is not a recognized command; such
    /// messages get no reply.
    pub async fn handle(&self, event: &InboundEvent) -> Option<String> {
        let command = Command::parse(&event.text)?;
        let verb = command.verb();
        debug!(verb, "Command received");

        let reply = match self.dispatch(command, event.user.as_ref()).await {
            Ok(reply) => reply,
            Err(e) => render_error(verb, &e),
        };
        Some(reply)
    }

    async fn dispatch(&self, command: Command, user: Option<&Actor>) -> Result<String, OrderError> {
        let actor = user.ok_or(OrderError::UnresolvedIdentity)?;

        match command {
            Command::Start => Ok(format!(
                "Hi {}! I'm the Food Order Bot.\nUse /help to see what I can do.",
                actor.display_name()
            )),
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::Food(text) => {
                let confirmation = self
                    .service
                    .place_order(actor, text.as_deref().unwrap_or_default())
                    .await?;
                Ok(render_confirmation(&confirmation))
            }
            Command::Reset => {
                let outcome = self.service.reset_order(actor).await?;
                Ok(render_reset(&actor.display_name(), outcome))
            }
            Command::Summary(None) => {
                let summary = self.service.summarize_today().await?;
                Ok(render_summary(&summary))
            }
            Command::Summary(Some(argument)) => match argument.parse::<Day>() {
                Ok(day) => {
                    let summary = self.service.summarize(day).await?;
                    Ok(render_summary(&summary))
                }
                Err(e) => {
                    info!(error = %e, "Rejected summary date");
                    Ok(SUMMARY_USAGE.to_string())
                }
            },
        }
    }
}

fn render_error(verb: &str, e: &OrderError) -> String {
    match e {
        OrderError::EmptyOrder => FOOD_USAGE.to_string(),
        OrderError::UnresolvedIdentity => {
            warn!(verb, "Command without an acting user");
            UNRESOLVED_IDENTITY.to_string()
        }
        OrderError::StorageUnavailable(reason) => {
            error!(verb, %reason, "Storage unavailable");
            STORAGE_FAILURE.to_string()
        }
    }
}

pub fn render_confirmation(confirmation: &OrderConfirmation) -> String {
    format!(
        "Got it, {}! Your order for today is now: {}",
        confirmation.display_name, confirmation.order_text
    )
}

pub fn render_reset(display_name: &str, outcome: ResetOutcome) -> String {
    match outcome {
        ResetOutcome::Removed => format!("Okay, {display_name}, removed your order for today."),
        ResetOutcome::NothingToRemove => {
            format!("{display_name}, couldn't find an order for you today.")
        }
    }
}

/// Renders a day summary as numbered lines between a header and a total.
pub fn render_summary(summary: &Summary) -> String {
    let day = summary.day();
    let entries = summary.entries();
    if entries.is_empty() {
        return format!("No orders placed yet for {day}.");
    }

    let mut text = format!("--- Food Orders for {day} ---\n\n");
    for (i, entry) in entries.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} - {} ({})\n",
            i + 1,
            entry.order_text,
            entry.display_name,
            entry.written_at.format("%H:%M")
        ));
    }
    text.push_str(&format!("\n--- Total Orders: {} ---", entries.len()));
    text
}
