//! `profile` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{Align, Table};
use crate::cmd::shared::lookup;
use crate::error::CliError;
use crate::obs::Transport;
use crate::obs::types::ProfileList;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List profiles
    #[command(visible_alias = "ls")]
    List,
    /// Print the current profile
    #[command(visible_alias = "c")]
    Current,
    /// Switch to another profile
    #[command(visible_alias = "sw")]
    Switch {
        /// Profile to switch to
        name: String,
    },
    /// Create a profile
    #[command(visible_alias = "new")]
    Create {
        /// Name of the new profile
        name: String,
    },
    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile to remove
        name: String,
    },
}

pub async fn execute_profile<T: Transport>(args: ProfileArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        ProfileCommand::List => {
            let list = profiles(ctx).await?;
            let mut table = Table::new(&["Profile Name", "Current"]).align(&[Align::Left, Align::Center]);
            for name in list.profiles {
                let current = if name == list.current_profile_name {
                    ctx.style.mark(true)
                } else {
                    String::new()
                };
                table.row([name, current]);
            }
            ctx.table(&table)
        }
        ProfileCommand::Current => {
            let list = profiles(ctx).await?;
            ctx.print(format!(
                "Current profile: {}",
                ctx.style.highlight(&list.current_profile_name)
            ))
        }
        ProfileCommand::Switch { name } => {
            let list = profiles(ctx).await?;
            if list.current_profile_name == name {
                return Err(CliError::invalid_state(format!(
                    "already using profile {}",
                    ctx.style.error(&name)
                ))
                .into());
            }
            lookup(list.profiles, "profile", &name, |p| p == &name)?;
            ctx.client
                .config()
                .set_current_profile(&name)
                .await
                .with_context(|| format!("failed to switch to profile {name}"))?;
            ctx.print(format!(
                "Switched from profile {} to {}",
                ctx.style.highlight(&list.current_profile_name),
                ctx.style.highlight(&name)
            ))
        }
        ProfileCommand::Create { name } => {
            let list = profiles(ctx).await?;
            if list.profiles.contains(&name) {
                return Err(CliError::invalid_state(format!(
                    "profile {} already exists",
                    ctx.style.error(&name)
                ))
                .into());
            }
            ctx.client
                .config()
                .create_profile(&name)
                .await
                .with_context(|| format!("failed to create profile {name}"))?;
            ctx.print(format!("Created profile: {}", ctx.style.highlight(&name)))
        }
        ProfileCommand::Remove { name } => {
            let list = profiles(ctx).await?;
            lookup(&list.profiles, "profile", &name, |p| **p == name)?;
            if list.current_profile_name == name {
                return Err(CliError::invalid_state(format!(
                    "cannot delete current profile {}",
                    ctx.style.error(&name)
                ))
                .into());
            }
            ctx.client
                .config()
                .remove_profile(&name)
                .await
                .with_context(|| format!("failed to delete profile {name}"))?;
            ctx.print(format!("Deleted profile: {}", ctx.style.highlight(&name)))
        }
    }
}

async fn profiles<T: Transport>(ctx: &mut Context<'_, T>) -> Result<ProfileList> {
    ctx.client
        .config()
        .profiles()
        .await
        .context("failed to get profile list")
}
