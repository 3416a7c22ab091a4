//! `projector` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{Align, Table};
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct ProjectorArgs {
    #[command(subcommand)]
    pub command: ProjectorCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectorCommand {
    /// List monitors available for projectors
    #[command(name = "list-monitors", visible_alias = "ls-m")]
    ListMonitors,

    /// Open a fullscreen projector for a source
    #[command(visible_alias = "o")]
    Open {
        /// Source to project (default: current program scene)
        source: Option<String>,

        /// Monitor to open the projector on
        #[arg(long, default_value_t = 0)]
        monitor_index: i64,
    },
}

pub async fn execute_projector<T: Transport>(
    args: ProjectorArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        ProjectorCommand::ListMonitors => {
            let monitors = ctx
                .client
                .ui()
                .monitors()
                .await
                .context("failed to get monitor list")?;
            if monitors.is_empty() {
                return ctx.print("No monitors found for projectors.");
            }
            let mut table = Table::new(&["Monitor ID", "Monitor Name"]).align(&[Align::Center, Align::Left]);
            for monitor in monitors {
                table.row([monitor.monitor_index.to_string(), monitor.monitor_name]);
            }
            ctx.table(&table)
        }
        ProjectorCommand::Open {
            source,
            monitor_index,
        } => {
            let source = ctx.scene_or_current(source).await?;
            ctx.client
                .ui()
                .open_source_projector(&source, monitor_index)
                .await
                .with_context(|| format!("failed to open projector for {source}"))?;
            ctx.print(format!(
                "Opened projector for source '{source}' on monitor index {monitor_index}."
            ))
        }
    }
}
