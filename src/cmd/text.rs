//! `text` command group: read or replace the text of a `text_*` input.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::cmd::Context;
use crate::error::CliError;
use crate::obs::Transport;
use crate::obs::types::InputSettings;

#[derive(Args, Debug)]
pub struct TextArgs {
    #[command(subcommand)]
    pub command: TextCommand,
}

#[derive(Subcommand, Debug)]
pub enum TextCommand {
    /// Print the current text of a text input
    #[command(visible_alias = "c")]
    Current {
        /// Name of the text source
        input: String,
    },

    /// Replace the text of a text input
    #[command(visible_alias = "u")]
    Update {
        /// Name of the text source
        input: String,
        /// New text (empty clears it)
        #[arg(default_value = "")]
        text: String,
    },
}

pub async fn execute_text<T: Transport>(args: TextArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        TextCommand::Current { input } => {
            let settings = text_settings(ctx, &input).await?;
            let text = match settings.input_settings.get("text") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => {
                    return Err(CliError::Validation(format!(
                        "input {input} does not have a 'text' setting"
                    ))
                    .into());
                }
            };
            let text = if text.is_empty() { "(empty)".to_string() } else { text };
            ctx.print(format!(
                "Current text for source {}: {text}",
                ctx.style.highlight(&input)
            ))
        }
        TextCommand::Update { input, text } => {
            let mut settings = text_settings(ctx, &input).await?.input_settings;
            settings.insert("text".into(), Value::String(text.clone()));
            ctx.client
                .inputs()
                .set_settings(&input, settings, false)
                .await
                .with_context(|| format!("failed to update text for source {input}"))?;
            ctx.print(format!(
                "Updated text for source {} to: {text}",
                ctx.style.highlight(&input)
            ))
        }
    }
}

/// Settings of `input`, refusing anything that is not a text source.
async fn text_settings<T: Transport>(ctx: &mut Context<'_, T>, input: &str) -> Result<InputSettings> {
    let settings = ctx
        .client
        .inputs()
        .settings(input)
        .await
        .with_context(|| format!("failed to get settings for input {input}"))?;
    if !settings.input_kind.starts_with("text_") {
        return Err(CliError::Validation(format!(
            "input {input} is of {}",
            settings.input_kind
        ))
        .into());
    }
    Ok(settings)
}
