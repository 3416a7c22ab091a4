//! `media` command group: cursor and playback control for media inputs.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{format_millis, parse_time_to_millis};
use crate::obs::{MediaAction, Transport};

#[derive(Args, Debug)]
pub struct MediaArgs {
    #[command(subcommand)]
    pub command: MediaCommand,
}

#[derive(Subcommand, Debug)]
pub enum MediaCommand {
    /// Get or set the cursor position of a media input
    #[command(visible_alias = "c")]
    Cursor {
        /// Media input name
        input: String,
        /// Position as SS, MM:SS or HH:MM:SS (omit to print the current one)
        time: Option<String>,
    },
    /// Play a media input
    #[command(visible_alias = "p")]
    Play { input: String },
    /// Pause a media input
    #[command(visible_alias = "pa")]
    Pause { input: String },
    /// Stop a media input
    #[command(visible_alias = "s")]
    Stop { input: String },
    /// Restart a media input
    #[command(visible_alias = "r")]
    Restart { input: String },
}

pub async fn execute_media<T: Transport>(args: MediaArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        MediaCommand::Cursor { input, time: None } => {
            let status = ctx
                .client
                .media_inputs()
                .status(&input)
                .await
                .with_context(|| format!("failed to get cursor of media input {input}"))?;
            let cursor = status.media_cursor.unwrap_or_default().max(0.0) as u64;
            let line = format!(
                "{} cursor position: {}",
                ctx.style.highlight(&input),
                format_millis(cursor)
            );
            ctx.print(line)
        }
        MediaCommand::Cursor {
            input,
            time: Some(time),
        } => {
            let millis = parse_time_to_millis(&time)?;
            ctx.client
                .media_inputs()
                .set_cursor(&input, millis)
                .await
                .with_context(|| format!("failed to set cursor of media input {input}"))?;
            let line = format!(
                "Set {} cursor to {} ({millis} ms)",
                ctx.style.highlight(&input),
                ctx.style.highlight(&time)
            );
            ctx.print(line)
        }
        MediaCommand::Play { input } => trigger(ctx, &input, MediaAction::Play).await,
        MediaCommand::Pause { input } => trigger(ctx, &input, MediaAction::Pause).await,
        MediaCommand::Stop { input } => trigger(ctx, &input, MediaAction::Stop).await,
        MediaCommand::Restart { input } => trigger(ctx, &input, MediaAction::Restart).await,
    }
}

async fn trigger<T: Transport>(ctx: &mut Context<'_, T>, input: &str, action: MediaAction) -> Result<()> {
    let (verb, progressive) = match action {
        MediaAction::Play => ("play", "Playing"),
        MediaAction::Pause => ("pause", "Pausing"),
        MediaAction::Stop => ("stop", "Stopping"),
        MediaAction::Restart => ("restart", "Restarting"),
    };
    ctx.client
        .media_inputs()
        .trigger(input, action)
        .await
        .with_context(|| format!("failed to {verb} media input {input}"))?;
    ctx.print(format!("{progressive} media input: {input}"))
}
