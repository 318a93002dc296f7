//! Intake service
//!
//! Runs one inbound event through the conversation state machine: loads the
//! sender's conversation, computes the transition, persists the resulting
//! notice and conversation change, then delivers the reply.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use crate::database::{ConversationStore, NoticeStore};
use crate::models::{ConversationState, Notice};
use crate::state::{transition, ConversationOp, InboundEvent, MenuCatalog, Reply};
use crate::utils::errors::Result;
use crate::utils::helpers::is_plain_integer;
use crate::utils::logging;

use super::notification::Notifier;
use super::sender_lock::SenderLocks;

/// What handling one event did, for logging and tests
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeOutcome {
    pub previous_state: ConversationState,
    /// `None` when the conversation was deleted
    pub next_state: Option<ConversationState>,
    pub notice: Option<Notice>,
    pub delivered: bool,
}

#[derive(Clone)]
pub struct IntakeService {
    conversations: Arc<dyn ConversationStore>,
    notices: Arc<dyn NoticeStore>,
    notifier: Arc<dyn Notifier>,
    catalog: Arc<MenuCatalog>,
    locks: SenderLocks,
}

impl IntakeService {
    pub fn new(
        conversations: Arc<dyn ConversationStore>,
        notices: Arc<dyn NoticeStore>,
        notifier: Arc<dyn Notifier>,
        catalog: MenuCatalog,
    ) -> Self {
        Self {
            conversations,
            notices,
            notifier,
            catalog: Arc::new(catalog),
            locks: SenderLocks::new(),
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    /// Handle one inbound event.
    ///
    /// Store failures are returned; delivery failures are logged and only
    /// reflected in `IntakeOutcome::delivered`.
    pub async fn handle(&self, event: InboundEvent) -> Result<IntakeOutcome> {
        let _guard = self.locks.acquire(&event.sender_id).await;

        let conversation = self.conversations.find_or_create(&event.sender_id).await?;
        debug!(
            sender_id = %event.sender_id,
            state = %conversation.state,
            selected_option_id = ?event.selected_option_id,
            "Handling inbound message"
        );

        if conversation.state == ConversationState::AwaitingAbsenceDays && !is_plain_integer(&event.text) {
            warn!(
                sender_id = %event.sender_id,
                text = %event.text,
                "Day count is not a plain number, storing the leniently parsed value"
            );
        }

        let today = Local::now().date_naive();
        let result = transition(&conversation, &event, &self.catalog, today);
        let next_state = match &result.conversation {
            ConversationOp::Keep => Some(conversation.state.clone()),
            ConversationOp::Save(next) => Some(next.state.clone()),
            ConversationOp::Delete => None,
        };

        let notice = match result.notice {
            Some(request) => {
                let notice = self.notices.create(request).await?;
                logging::log_notice_created(notice.id, &notice.sender_id, notice.notice_type.as_str());
                Some(notice)
            }
            None => None,
        };

        match &result.conversation {
            ConversationOp::Keep => {
                debug!(sender_id = %event.sender_id, state = %conversation.state, "Conversation unchanged");
            }
            ConversationOp::Save(next) => {
                self.conversations.save(next).await?;
                logging::log_transition(&event.sender_id, conversation.state.as_str(), Some(next.state.as_str()));
            }
            ConversationOp::Delete => {
                self.conversations.delete(&conversation).await?;
                logging::log_transition(&event.sender_id, conversation.state.as_str(), None);
            }
        }

        let delivered = self.deliver(&event.sender_id, &result.reply).await;

        Ok(IntakeOutcome {
            previous_state: conversation.state,
            next_state,
            notice,
            delivered,
        })
    }

    async fn deliver(&self, sender_id: &str, reply: &Reply) -> bool {
        let (context, outcome) = match reply {
            Reply::SendText(text) => ("text", self.notifier.send_text(sender_id, text).await),
            Reply::SendMenu => ("interactive_menu", self.notifier.send_menu(sender_id, &self.catalog).await),
            Reply::SendNothing => return false,
        };

        match outcome {
            Ok(receipt) => {
                debug!(sender_id = sender_id, context = context, message_id = ?receipt.message_id, "Reply delivered");
                true
            }
            Err(error) => {
                logging::log_delivery_failure(sender_id, context, &error);
                false
            }
        }
    }
}
