use std::time::Instant;

use crate::api::ChatReply;
use crate::errors::CliError;
use crate::session::{PendingSend, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Widget,
    Help,
}

#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub should_quit: bool,

    pub api_url: String,
    pub asset_base: String,
    pub logo: String,
    pub avatar: String,

    pub session: Session,

    pub status: String,
    pub last_elapsed_ms: Option<u128>,

    pub scroll_from_bottom: usize,
    seen_messages: usize,

    pub spinner_step: u64,
    pub spinner_last: Instant,
}

impl App {
    pub fn new(session: Session, api_url: String, asset_base: String) -> Self {
        Self {
            mode: Mode::Widget,
            should_quit: false,
            api_url,
            asset_base,
            logo: crate::config::DEFAULT_LOGO.to_string(),
            avatar: crate::config::DEFAULT_AVATAR.to_string(),
            session,
            status: "Ready".to_string(),
            last_elapsed_ms: None,
            scroll_from_bottom: 0,
            seen_messages: 0,
            spinner_step: 0,
            spinner_last: Instant::now(),
        }
    }

    /// Snaps the chat back to the newest message whenever one arrives.
    pub fn follow_new_messages(&mut self) {
        let count = self.session.messages().len();
        if count != self.seen_messages {
            self.seen_messages = count;
            self.scroll_from_bottom = 0;
        }
    }
}

#[derive(Debug)]
pub enum TuiMsg {
    Reply(PendingSend, Result<ChatReply, CliError>),
    BackgroundTick,
}
