use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::errors::CliError;
use crate::format::link_targets;
use crate::tui::types::{App, Mode, TuiMsg};

use super::async_ops::spawn_chat_request;

const SCROLL_STEP: usize = 5;

pub fn handle_event(
    api: &ApiClient,
    tx: &mpsc::UnboundedSender<TuiMsg>,
    app: &mut App,
    event: Event,
) -> Result<(), CliError> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(api, tx, app, key),
        Event::Paste(text) => {
            if app.session.is_open() {
                let mut draft = app.session.draft().to_string();
                draft.push_str(&text.replace(['\r', '\n'], " "));
                app.session.set_draft(draft);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn handle_key(
    api: &ApiClient,
    tx: &mpsc::UnboundedSender<TuiMsg>,
    app: &mut App,
    key: KeyEvent,
) -> Result<(), CliError> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    if app.mode == Mode::Help {
        app.mode = Mode::Widget;
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::F(1) => {
            app.mode = Mode::Help;
        }
        KeyCode::Tab | KeyCode::F(2) => {
            app.session.toggle_panel();
            app.follow_new_messages();
        }
        KeyCode::Enter if !app.session.is_open() => {
            app.session.toggle_panel();
            app.follow_new_messages();
        }
        _ if !app.session.is_open() => {}
        KeyCode::Enter => send_draft(api, tx, app),
        KeyCode::Backspace => {
            app.session.pop_draft_char();
        }
        KeyCode::PageUp => {
            app.scroll_from_bottom = app.scroll_from_bottom.saturating_add(SCROLL_STEP);
        }
        KeyCode::PageDown => {
            app.scroll_from_bottom = app.scroll_from_bottom.saturating_sub(SCROLL_STEP);
        }
        KeyCode::End => {
            app.scroll_from_bottom = 0;
        }
        KeyCode::Char('o') if ctrl => open_latest_link(app)?,
        KeyCode::Char('u') if ctrl => {
            app.session.set_draft(String::new());
        }
        KeyCode::Char(ch) if !ctrl => {
            app.session.push_draft_char(ch);
        }
        _ => {}
    }
    Ok(())
}

/// Input stays live while a request is out, so this may overlap an earlier send.
fn send_draft(api: &ApiClient, tx: &mpsc::UnboundedSender<TuiMsg>, app: &mut App) {
    let Some(ticket) = app.session.begin_send() else {
        return;
    };
    app.follow_new_messages();
    app.status = "Sending...".to_string();
    spawn_chat_request(api.clone(), tx.clone(), ticket);
}

fn open_latest_link(app: &mut App) -> Result<(), CliError> {
    let Some(href) = app
        .session
        .messages()
        .iter()
        .rev()
        .find_map(|m| link_targets(m.text()).pop())
    else {
        app.status = "No links in this conversation yet.".to_string();
        return Ok(());
    };

    open::that_detached(&href)
        .map_err(|e| CliError::Generic(format!("Failed to open {href}: {e}")))?;
    tracing::info!(%href, "opened link");
    app.status = format!("Opened {href}");
    Ok(())
}
