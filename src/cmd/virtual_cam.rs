//! `virtual-cam` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct VirtualCamArgs {
    #[command(subcommand)]
    pub command: VirtualCamCommand,
}

#[derive(Subcommand, Debug)]
pub enum VirtualCamCommand {
    /// Start the virtual camera
    #[command(visible_alias = "s")]
    Start,
    /// Stop the virtual camera
    #[command(visible_alias = "st")]
    Stop,
    /// Toggle the virtual camera
    #[command(visible_alias = "tg")]
    Toggle,
    /// Show virtual camera status
    #[command(visible_alias = "ss")]
    Status,
}

pub async fn execute_virtual_cam<T: Transport>(
    args: VirtualCamArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        VirtualCamCommand::Start => {
            ctx.client
                .outputs()
                .start_virtual_cam()
                .await
                .context("failed to start virtual camera")?;
            ctx.print("Virtual camera started.")
        }
        VirtualCamCommand::Stop => {
            ctx.client
                .outputs()
                .stop_virtual_cam()
                .await
                .context("failed to stop virtual camera")?;
            ctx.print("Virtual camera stopped.")
        }
        VirtualCamCommand::Toggle => {
            let active = ctx
                .client
                .outputs()
                .toggle_virtual_cam()
                .await
                .context("failed to toggle virtual camera")?;
            ctx.print(if active { "Virtual camera started." } else { "Virtual camera stopped." })
        }
        VirtualCamCommand::Status => {
            let status = ctx
                .client
                .outputs()
                .virtual_cam_status()
                .await
                .context("failed to get virtual camera status")?;
            ctx.print(if status.output_active {
                "Virtual camera is active."
            } else {
                "Virtual camera is inactive."
            })
        }
    }
}
