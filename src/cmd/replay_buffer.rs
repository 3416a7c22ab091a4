//! `replay-buffer` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct ReplayBufferArgs {
    #[command(subcommand)]
    pub command: ReplayBufferCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReplayBufferCommand {
    /// Start the replay buffer
    #[command(visible_alias = "s")]
    Start,
    /// Stop the replay buffer
    #[command(visible_alias = "st")]
    Stop,
    /// Toggle the replay buffer
    #[command(visible_alias = "tg")]
    Toggle,
    /// Show replay buffer status
    #[command(visible_alias = "ss")]
    Status,
    /// Save the replay buffer to disk
    #[command(visible_alias = "sv")]
    Save,
}

pub async fn execute_replay_buffer<T: Transport>(
    args: ReplayBufferArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        ReplayBufferCommand::Start => {
            ctx.client
                .outputs()
                .start_replay_buffer()
                .await
                .context("failed to start replay buffer")?;
            ctx.print("Replay buffer started.")
        }
        ReplayBufferCommand::Stop => {
            ctx.client
                .outputs()
                .stop_replay_buffer()
                .await
                .context("failed to stop replay buffer")?;
            ctx.print("Replay buffer stopped.")
        }
        ReplayBufferCommand::Toggle => {
            let active = ctx
                .client
                .outputs()
                .toggle_replay_buffer()
                .await
                .context("failed to toggle replay buffer")?;
            ctx.print(if active { "Replay buffer started." } else { "Replay buffer stopped." })
        }
        ReplayBufferCommand::Status => {
            let status = ctx
                .client
                .outputs()
                .replay_buffer_status()
                .await
                .context("failed to get replay buffer status")?;
            if status.output_active {
                ctx.print("Replay buffer is active.")
            } else {
                ctx.print("Replay buffer is not active.")
            }
        }
        ReplayBufferCommand::Save => {
            ctx.client
                .outputs()
                .save_replay_buffer()
                .await
                .context("failed to save replay buffer")?;
            ctx.print("Replay buffer saved")
        }
    }
}
