//! `scene-collection` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::Table;
use crate::cmd::shared::lookup;
use crate::error::CliError;
use crate::obs::Transport;
use crate::obs::types::SceneCollectionList;

#[derive(Args, Debug)]
pub struct SceneCollectionArgs {
    #[command(subcommand)]
    pub command: SceneCollectionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SceneCollectionCommand {
    /// List scene collections
    #[command(visible_alias = "ls")]
    List,
    /// Print the current scene collection
    #[command(visible_alias = "c")]
    Current,
    /// Switch to another scene collection
    #[command(visible_alias = "sw")]
    Switch {
        /// Scene collection to switch to
        name: String,
    },
    /// Create a scene collection and switch to it
    #[command(visible_alias = "new")]
    Create {
        /// Name of the new scene collection
        name: String,
    },
}

pub async fn execute_scene_collection<T: Transport>(
    args: SceneCollectionArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        SceneCollectionCommand::List => {
            let list = collections(ctx).await?;
            let mut table = Table::new(&["Scene Collection Name"]);
            for name in list.scene_collections {
                table.row([name]);
            }
            ctx.table(&table)
        }
        SceneCollectionCommand::Current => {
            let list = collections(ctx).await?;
            ctx.print(list.current_scene_collection_name)
        }
        SceneCollectionCommand::Switch { name } => {
            let list = collections(ctx).await?;
            if list.current_scene_collection_name == name {
                return Err(CliError::invalid_state(format!(
                    "scene collection {} is already active",
                    ctx.style.error(&name)
                ))
                .into());
            }
            lookup(list.scene_collections, "scene collection", &name, |c| c == &name)?;
            ctx.client
                .config()
                .set_current_scene_collection(&name)
                .await
                .with_context(|| format!("failed to switch scene collection {name}"))?;
            ctx.print(format!(
                "Switched to scene collection: {}",
                ctx.style.highlight(&name)
            ))
        }
        SceneCollectionCommand::Create { name } => {
            ctx.client
                .config()
                .create_scene_collection(&name)
                .await
                .with_context(|| format!("failed to create scene collection {name}"))?;
            ctx.print(format!(
                "Created scene collection: {}",
                ctx.style.highlight(&name)
            ))
        }
    }
}

async fn collections<T: Transport>(ctx: &mut Context<'_, T>) -> Result<SceneCollectionList> {
    ctx.client
        .config()
        .scene_collections()
        .await
        .context("failed to get scene collection list")
}
