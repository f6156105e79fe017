use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::{ApiClient, ChatBackend};
use crate::background::Ticker;
use crate::session::PendingSend;
use crate::tui::types::TuiMsg;

/// One request task per send; the outcome goes back to the UI loop with its ticket.
pub fn spawn_chat_request(api: ApiClient, tx: mpsc::UnboundedSender<TuiMsg>, ticket: PendingSend) {
    tracing::debug!(send_id = ticket.id(), "chat request started");
    tokio::spawn(async move {
        let res = api.ask(ticket.question()).await;
        let _ = tx.send(TuiMsg::Reply(ticket, res));
    });
}

pub fn spawn_background_ticker(period: Duration, tx: mpsc::UnboundedSender<TuiMsg>) -> Ticker {
    Ticker::spawn(period, tx, || TuiMsg::BackgroundTick)
}
