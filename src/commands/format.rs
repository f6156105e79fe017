use std::io::{self, Read};

use clap::Args;
use serde_json::json;

use crate::app::Runtime;
use crate::errors::CliError;
use crate::format::{format, link_targets};

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Reply text to render (reads stdin when omitted)
    pub text: Option<String>,
}

pub async fn handle(runtime: &Runtime, args: FormatArgs) -> Result<(), CliError> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| CliError::Generic(format!("Failed reading stdin: {e}")))?;
            input
        }
    };

    let html = format(&text);
    if runtime.output.json {
        runtime.output.print_json(&json!({
            "html": html,
            "links": link_targets(&text),
        }))?;
        return Ok(());
    }

    runtime.output.print_human(&html);
    Ok(())
}
