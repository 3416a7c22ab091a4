//! `studio-mode` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct StudioModeArgs {
    #[command(subcommand)]
    pub command: StudioModeCommand,
}

#[derive(Subcommand, Debug)]
pub enum StudioModeCommand {
    /// Enable studio mode
    #[command(visible_alias = "on")]
    Enable,
    /// Disable studio mode
    #[command(visible_alias = "off")]
    Disable,
    /// Toggle studio mode
    #[command(visible_alias = "tg")]
    Toggle,
    /// Show studio mode status
    #[command(visible_alias = "ss")]
    Status,
}

pub async fn execute_studio_mode<T: Transport>(
    args: StudioModeArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        StudioModeCommand::Enable => set(ctx, true).await,
        StudioModeCommand::Disable => set(ctx, false).await,
        StudioModeCommand::Toggle => {
            let enabled = enabled(ctx).await?;
            set(ctx, !enabled).await
        }
        StudioModeCommand::Status => {
            let state = if enabled(ctx).await? { "enabled" } else { "disabled" };
            ctx.print(format!("Studio mode is {state}"))
        }
    }
}

async fn enabled<T: Transport>(ctx: &mut Context<'_, T>) -> Result<bool> {
    ctx.client
        .ui()
        .studio_mode_enabled()
        .await
        .context("failed to get studio mode status")
}

async fn set<T: Transport>(ctx: &mut Context<'_, T>, enabled: bool) -> Result<()> {
    let state = if enabled { "enabled" } else { "disabled" };
    ctx.client
        .ui()
        .set_studio_mode_enabled(enabled)
        .await
        .with_context(|| format!("failed to set studio mode {state}"))?;
    ctx.print(format!("Studio mode is now {state}"))
}
