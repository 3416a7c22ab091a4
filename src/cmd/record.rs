/*!
`record` command group.

Every leaf that depends on the recording state reads `GetRecordStatus` first
and refuses with an InvalidState error instead of letting OBS reject the call.
*/

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::error::CliError;
use crate::obs::Transport;
use crate::obs::types::OutputStatus;

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub command: RecordCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// Start recording
    #[command(visible_alias = "s")]
    Start,
    /// Stop recording
    #[command(visible_alias = "st")]
    Stop,
    /// Toggle recording
    #[command(visible_alias = "tg")]
    Toggle,
    /// Show recording status
    #[command(visible_alias = "ss")]
    Status,
    /// Pause recording
    #[command(visible_alias = "p")]
    Pause,
    /// Resume a paused recording
    #[command(visible_alias = "r")]
    Resume,
    /// Print or set the recording directory
    #[command(visible_alias = "d")]
    Directory {
        /// New recording directory
        dir: Option<String>,
    },
    /// Split the recording into a new file
    #[command(visible_alias = "sp")]
    Split,
    /// Add a chapter marker to the recording
    #[command(visible_alias = "c")]
    Chapter {
        /// Chapter name
        name: Option<String>,
    },
}

pub async fn execute_record<T: Transport>(args: RecordArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        RecordCommand::Start => {
            let status = status(ctx).await?;
            if status.output_active {
                let msg = if status.output_paused {
                    "recording is already in progress and paused"
                } else {
                    "recording is already in progress"
                };
                return Err(CliError::invalid_state(msg).into());
            }
            ctx.client.record().start().await.context("failed to start recording")?;
            ctx.print("Recording started successfully.")
        }
        RecordCommand::Stop => {
            require_active(&status(ctx).await?)?;
            let path = ctx.client.record().stop().await.context("failed to stop recording")?;
            ctx.print(format!(
                "Recording stopped successfully. Output file: {}",
                ctx.style.highlight(path)
            ))
        }
        RecordCommand::Toggle => {
            let active = ctx.client.record().toggle().await.context("failed to toggle recording")?;
            if active {
                ctx.print("Recording started successfully.")
            } else {
                ctx.print("Recording stopped successfully.")
            }
        }
        RecordCommand::Status => {
            let status = status(ctx).await?;
            let msg = match (status.output_active, status.output_paused) {
                (true, true) => "Recording is paused.",
                (true, false) => "Recording is in progress.",
                (false, _) => "Recording is not in progress.",
            };
            ctx.print(msg)
        }
        RecordCommand::Pause => {
            let status = status(ctx).await?;
            require_active(&status)?;
            if status.output_paused {
                return Err(CliError::invalid_state("recording is already paused").into());
            }
            ctx.client.record().pause().await.context("failed to pause recording")?;
            ctx.print("Recording paused successfully.")
        }
        RecordCommand::Resume => {
            let status = status(ctx).await?;
            require_active(&status)?;
            if !status.output_paused {
                return Err(CliError::invalid_state("recording is not paused").into());
            }
            ctx.client.record().resume().await.context("failed to resume recording")?;
            ctx.print("Recording resumed successfully.")
        }
        RecordCommand::Directory { dir: None } => {
            let dir = ctx
                .client
                .config()
                .record_directory()
                .await
                .context("failed to get recording directory")?;
            ctx.print(format!("Current recording directory: {}", ctx.style.highlight(dir)))
        }
        RecordCommand::Directory { dir: Some(dir) } => {
            ctx.client
                .config()
                .set_record_directory(&dir)
                .await
                .with_context(|| format!("failed to set recording directory to {dir}"))?;
            ctx.print(format!("Recording directory set to: {}", ctx.style.highlight(dir)))
        }
        RecordCommand::Split => {
            require_active(&status(ctx).await?)?;
            ctx.client.record().split().await.context("failed to split recording")?;
            ctx.print("Recording split successfully.")
        }
        RecordCommand::Chapter { name } => {
            require_active(&status(ctx).await?)?;
            let name = name.filter(|n| !n.is_empty());
            ctx.client
                .record()
                .chapter(name.as_deref())
                .await
                .context("failed to create chapter")?;
            let label = name.unwrap_or_else(|| "unnamed".to_string());
            ctx.print(format!("Chapter {} created successfully.", ctx.style.highlight(label)))
        }
    }
}

async fn status<T: Transport>(ctx: &mut Context<'_, T>) -> Result<OutputStatus> {
    ctx.client
        .record()
        .status()
        .await
        .context("failed to get recording status")
}

fn require_active(status: &OutputStatus) -> Result<(), CliError> {
    if status.output_active {
        Ok(())
    } else {
        Err(CliError::invalid_state("recording is not in progress"))
    }
}
