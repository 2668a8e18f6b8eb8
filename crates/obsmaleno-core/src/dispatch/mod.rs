//! Routes inbound events to sessions and relays replies.
//!
//! Two effective paths per event:
//! - `/start`: get-or-create the session, send the scripted greeting
//!   through it, relay the reply.
//! - free text: forward to the existing session and relay the reply. A user
//!   with no session yet is first taken through the `/start` path, then the
//!   original text is forwarded, so they receive two replies.
//!
//! Any model failure becomes the static apology. Delivery failures are
//! logged only. Nothing here ever returns an error to the webhook caller.

pub mod failure;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use obsmaleno_types::ChatId;
use obsmaleno_types::event::{Command, EventKind, InboundEvent};

use crate::chat::registry::SessionRegistry;
use crate::chat::session::ChatSession;
use crate::chat::store::SessionStore;
use crate::messenger::Messenger;
use crate::persona::{APOLOGY, GREETING};

use self::failure::TurnFailure;

/// What happened while handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// A new session was created for the sender.
    pub session_created: bool,
    /// Replies (model text or apology) accepted by the messenger.
    pub replies_sent: usize,
    /// Model turns that failed and were answered with the apology.
    pub failures: usize,
    /// The event was an unrecognised command and produced no reply.
    pub ignored: bool,
}

/// Webhook dispatcher: owns the session registry and the outbound messenger.
pub struct Dispatcher<S: SessionStore, M: Messenger> {
    registry: SessionRegistry<S>,
    messenger: M,
}

impl<S: SessionStore, M: Messenger> Dispatcher<S, M> {
    pub fn new(registry: SessionRegistry<S>, messenger: M) -> Self {
        Self {
            registry,
            messenger,
        }
    }

    pub fn registry(&self) -> &SessionRegistry<S> {
        &self.registry
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Handle one inbound event end to end.
    pub async fn handle(&self, event: &InboundEvent) -> DispatchReport {
        info!(
            user_id = event.user_id,
            chat_id = event.chat_id,
            "[{}] {}",
            event.user_id,
            event.text
        );

        let mut report = DispatchReport::default();

        match &event.kind {
            EventKind::Command(Command::Start) => {
                self.start(event, &mut report).await;
            }
            EventKind::Command(other) => {
                debug!(user_id = event.user_id, command = %other, "ignoring unsupported command");
                report.ignored = true;
            }
            EventKind::FreeText => match self.registry.get(event.user_id) {
                Some(session) => {
                    self.turn(event.chat_id, &session, &event.text, &mut report)
                        .await;
                }
                None => {
                    debug!(
                        user_id = event.user_id,
                        "no session yet, treating message as /start"
                    );
                    self.start(event, &mut report).await;
                    if let Some(session) = self.registry.get(event.user_id) {
                        self.turn(event.chat_id, &session, &event.text, &mut report)
                            .await;
                    }
                }
            },
        }

        report
    }

    async fn start(&self, event: &InboundEvent, report: &mut DispatchReport) {
        match self.registry.get_or_create(event.user_id).await {
            Ok(acquired) => {
                report.session_created |= acquired.created;
                self.turn(event.chat_id, &acquired.session, GREETING, report)
                    .await;
            }
            Err(e) => {
                // Seeding only happens for a freshly stored session.
                report.session_created = true;
                self.deliver(event.chat_id, Err(TurnFailure::from(e)), report)
                    .await;
            }
        }
    }

    async fn turn(
        &self,
        chat_id: ChatId,
        session: &Arc<ChatSession>,
        text: &str,
        report: &mut DispatchReport,
    ) {
        let outcome = session.send(text).await.map_err(TurnFailure::from);
        self.deliver(chat_id, outcome, report).await;
    }

    async fn deliver(
        &self,
        chat_id: ChatId,
        outcome: Result<String, TurnFailure>,
        report: &mut DispatchReport,
    ) {
        let text = match outcome {
            Ok(reply) => reply,
            Err(failure) => {
                error!(
                    chat_id,
                    class = %failure.class,
                    error = %failure.source,
                    "model call failed, sending apology"
                );
                report.failures += 1;
                APOLOGY.to_string()
            }
        };

        match self.messenger.send_text(chat_id, &text).await {
            Ok(()) => report.replies_sent += 1,
            Err(e) => warn!(chat_id, error = %e, "failed to deliver reply"),
        }
    }
}
