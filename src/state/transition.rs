//! Pure conversation transition function
//!
//! Given the stored conversation, an inbound event and the menu catalog,
//! computes what to persist and what to answer. No I/O happens here; the
//! intake service applies the returned intents.

use chrono::NaiveDate;

use crate::models::{Conversation, ConversationState, CreateNoticeRequest, NoticeType};
use crate::utils::helpers::parse_day_count;

use super::menu::MenuCatalog;

/// A message received from a sender, reduced to what the flow consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub sender_id: String,
    pub text: String,
    pub selected_option_id: Option<String>,
}

impl InboundEvent {
    pub fn text(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: text.into(),
            selected_option_id: None,
        }
    }

    pub fn button(sender_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: String::new(),
            selected_option_id: Some(option_id.into()),
        }
    }
}

/// What to do with the stored conversation
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationOp {
    /// Leave the record untouched
    Keep,
    /// Persist the updated record
    Save(Conversation),
    /// Remove the record so the next message starts over
    Delete,
}

/// What to send back to the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    SendText(String),
    SendMenu,
    /// Reserved for silent transitions; every current state answers
    SendNothing,
}

/// Result of a transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub conversation: ConversationOp,
    pub notice: Option<CreateNoticeRequest>,
    pub reply: Reply,
}

impl Transition {
    fn save(conversation: Conversation, reply: Reply) -> Self {
        Self {
            conversation: ConversationOp::Save(conversation),
            notice: None,
            reply,
        }
    }

    fn with_notice(mut self, notice: CreateNoticeRequest) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Advance a conversation by one inbound event
pub fn transition(
    conversation: &Conversation,
    event: &InboundEvent,
    catalog: &MenuCatalog,
    today: NaiveDate,
) -> Transition {
    match &conversation.state {
        ConversationState::AwaitingId => {
            let mut next = conversation.clone();
            next.subject_id = Some(event.text.clone());
            next.state = ConversationState::AwaitingType;
            Transition::save(next, Reply::SendMenu)
        }

        ConversationState::AwaitingType => {
            match catalog.resolve(event.selected_option_id.as_deref(), &event.text) {
                Some(NoticeType::Absence) => {
                    let mut next = conversation.clone();
                    next.notice_type = Some(NoticeType::Absence);
                    next.state = ConversationState::AwaitingAbsenceDays;
                    Transition::save(next, Reply::SendText(catalog.prompts.ask_absence_days.clone()))
                }
                Some(NoticeType::Certificate) => {
                    let mut next = conversation.clone();
                    next.notice_type = Some(NoticeType::Certificate);
                    next.state = ConversationState::AwaitingCertificateDetail;
                    Transition::save(next, Reply::SendText(catalog.prompts.ask_certificate_detail.clone()))
                }
                None => Transition {
                    conversation: ConversationOp::Keep,
                    notice: None,
                    reply: Reply::SendMenu,
                },
            }
        }

        ConversationState::AwaitingAbsenceDays => {
            let notice = CreateNoticeRequest::absence(
                conversation.subject_id.clone().unwrap_or_default(),
                conversation.sender_id.clone(),
                today,
                parse_day_count(&event.text),
            );
            let mut next = conversation.clone();
            next.state = ConversationState::Completed;
            Transition::save(next, Reply::SendText(catalog.prompts.absence_recorded.clone()))
                .with_notice(notice)
        }

        ConversationState::AwaitingCertificateDetail => {
            let notice = CreateNoticeRequest::certificate(
                conversation.subject_id.clone().unwrap_or_default(),
                conversation.sender_id.clone(),
                event.text.clone(),
            );
            let mut next = conversation.clone();
            next.state = ConversationState::Completed;
            Transition::save(next, Reply::SendText(catalog.prompts.certificate_recorded.clone()))
                .with_notice(notice)
        }

        ConversationState::Completed | ConversationState::Stale(_) => reset(catalog),
    }
}

/// Terminal branch: drop the conversation and ask for the subject id again
pub fn reset(catalog: &MenuCatalog) -> Transition {
    Transition {
        conversation: ConversationOp::Delete,
        notice: None,
        reply: Reply::SendText(catalog.prompts.restart.clone()),
    }
}
