//! Chat session state and its transitions.
//!
//! A [`Session`] is the only owner of the conversation; views read it through
//! accessors and change it through the transition methods. Sending is split in
//! two ([`Session::begin_send`] / [`Session::finish_send`]) so the request can
//! run on another task while the UI keeps handling input.
//!
//! Replies are appended to whatever the message list holds when they resolve,
//! so overlapping sends never drop each other's messages.

use serde::Serialize;

use crate::api::{ChatBackend, ChatReply};
use crate::background::Background;
use crate::errors::CliError;

pub const GREETING: &str =
    "Hi! I’m COSMO, your one stop solution for all things UTD! \n\nHow may I help you today?";
pub const FALLBACK_REPLY: &str = "Oops! Something went wrong.";
pub const TYPING_TEXT: &str = "COSMO is searching the UTD cosmos...";
pub const DRAFT_PLACEHOLDER: &str = "Ask something...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(rename = "type")]
    kind: MessageKind,
    text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Bot,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Handle for one in-flight send.
#[derive(Debug)]
pub struct PendingSend {
    id: u64,
    question: String,
}

impl PendingSend {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

#[derive(Debug, Default)]
pub struct Session {
    open: bool,
    draft: String,
    messages: Vec<Message>,
    background: Background,
    outstanding: usize,
    next_send_id: u64,
}

impl Session {
    pub fn new(background: Background) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }

    pub fn toggle_panel(&mut self) {
        self.open = !self.open;
        if self.open && self.messages.is_empty() {
            self.messages.push(Message::bot(GREETING));
        }
        tracing::debug!(open = self.open, "panel toggled");
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push_draft_char(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn pop_draft_char(&mut self) -> Option<char> {
        self.draft.pop()
    }

    /// Moves the draft into the conversation.
    ///
    /// `None` (and nothing changes) when the draft is blank once trimmed.
    /// The user message and the question keep the untrimmed text.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if self.draft.trim().is_empty() {
            return None;
        }

        let question = std::mem::take(&mut self.draft);
        self.messages.push(Message::user(question.clone()));
        self.outstanding += 1;
        self.next_send_id += 1;

        let ticket = PendingSend {
            id: self.next_send_id,
            question,
        };
        tracing::info!(
            send_id = ticket.id,
            outstanding = self.outstanding,
            "question sent"
        );
        Some(ticket)
    }

    pub fn finish_send(&mut self, ticket: PendingSend, outcome: Result<ChatReply, CliError>) {
        let text = match outcome {
            Ok(reply) => reply.text,
            Err(err) => {
                tracing::warn!(send_id = ticket.id, "chat request failed: {err}");
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(Message::bot(text));
        self.outstanding = self.outstanding.saturating_sub(1);
        tracing::debug!(
            send_id = ticket.id,
            outstanding = self.outstanding,
            "send resolved"
        );
    }

    /// One full send against `backend`. Returns `false` on a blank draft.
    pub async fn send_message<B: ChatBackend>(&mut self, backend: &B) -> bool {
        let Some(ticket) = self.begin_send() else {
            return false;
        };
        let outcome = backend.ask(ticket.question()).await;
        self.finish_send(ticket, outcome);
        true
    }

    pub fn advance_background(&mut self) -> usize {
        self.background.advance()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.outstanding > 0
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn background_index(&self) -> usize {
        self.background.index()
    }

    pub fn current_background(&self) -> &str {
        self.background.current()
    }

    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.kind == MessageKind::Bot)
    }
}
