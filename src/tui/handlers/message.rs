use crate::tui::types::{App, TuiMsg};

pub fn handle_tui_msg(app: &mut App, msg: TuiMsg) {
    match msg {
        TuiMsg::Reply(ticket, res) => {
            match &res {
                Ok(reply) => {
                    app.last_elapsed_ms = Some(reply.elapsed_ms);
                    app.status = "Ready".to_string();
                }
                Err(err) => {
                    app.last_elapsed_ms = None;
                    app.status = format!("Request failed: {err}");
                }
            }
            app.session.finish_send(ticket, res);
            app.follow_new_messages();
        }
        TuiMsg::BackgroundTick => {
            app.session.advance_background();
        }
    }
}
