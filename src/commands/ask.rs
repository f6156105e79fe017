use std::io::{self, Read};

use clap::Args;
use serde_json::json;

use crate::app::Runtime;
use crate::errors::CliError;
use crate::format::format;
use crate::session::{Message, Session};

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Question text
    pub question: Option<String>,
    /// Read the question from stdin
    #[arg(long)]
    pub stdin: bool,
    /// Print the reply as formatted HTML instead of raw text
    #[arg(long)]
    pub html: bool,
}

pub async fn handle(runtime: &Runtime, args: AskArgs) -> Result<(), CliError> {
    let question = resolve_question(&args)?;
    let api = runtime.api_client()?;

    let mut session = Session::default();
    session.set_draft(question.clone());
    runtime
        .output
        .print_verbose(&format!("POST {}/chat", api.base_url().trim_end_matches('/')));
    session.send_message(&api).await;

    // A failed request still resolves to the fallback bubble, same as the widget.
    let reply = session
        .last_bot_message()
        .map(Message::text)
        .unwrap_or_default();

    if runtime.output.json {
        runtime.output.print_json(&json!({
            "question": question,
            "response": reply,
            "messages": session.messages(),
        }))?;
        return Ok(());
    }

    if args.html {
        runtime.output.print_human(&format(reply));
    } else {
        runtime.output.print_human(reply);
    }
    Ok(())
}

fn resolve_question(args: &AskArgs) -> Result<String, CliError> {
    if args.stdin {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|e| CliError::Generic(format!("Failed reading stdin: {e}")))?;
        return non_blank(input, "No question provided via stdin.");
    }

    non_blank(
        args.question.clone().unwrap_or_default(),
        "Missing question. Use `cosmo ask \"...\"` or pass `--stdin`.",
    )
}

/// Blank questions never reach the network; the text itself is kept as typed.
fn non_blank(text: String, message: &str) -> Result<String, CliError> {
    if text.trim().is_empty() {
        return Err(CliError::Usage(message.to_string()));
    }
    Ok(text)
}
