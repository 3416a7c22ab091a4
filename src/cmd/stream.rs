//! `stream` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct StreamArgs {
    #[command(subcommand)]
    pub command: StreamCommand,
}

#[derive(Subcommand, Debug)]
pub enum StreamCommand {
    /// Start streaming
    #[command(visible_alias = "s")]
    Start,
    /// Stop streaming
    #[command(visible_alias = "st")]
    Stop,
    /// Toggle streaming
    #[command(visible_alias = "tg")]
    Toggle,
    /// Show streaming status
    #[command(visible_alias = "ss")]
    Status,
}

pub async fn execute_stream<T: Transport>(args: StreamArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        StreamCommand::Start => {
            ctx.client.stream().start().await.context("failed to start streaming")?;
            ctx.print("Streaming started successfully.")
        }
        StreamCommand::Stop => {
            ctx.client.stream().stop().await.context("failed to stop streaming")?;
            ctx.print("Streaming stopped successfully.")
        }
        StreamCommand::Toggle => {
            let active = ctx.client.stream().toggle().await.context("failed to toggle streaming")?;
            if active {
                ctx.print("Streaming started successfully.")
            } else {
                ctx.print("Streaming stopped successfully.")
            }
        }
        StreamCommand::Status => {
            let status = ctx
                .client
                .stream()
                .status()
                .await
                .context("failed to get streaming status")?;
            ctx.print(format!("Output active: {}", status.output_active))?;
            if status.output_active {
                ctx.print(format_duration(status.output_duration))?;
            }
            Ok(())
        }
    }
}

/// `Output duration: ...` line for a duration in milliseconds.
fn format_duration(millis: f64) -> String {
    let total = (millis / 1000.0).max(0.0) as u64;
    let (minutes, seconds) = (total / 60, total % 60);
    if minutes > 0 {
        format!("Output duration: {minutes} minutes and {seconds} seconds")
    } else {
        format!("Output duration: {seconds} seconds")
    }
}
