/*!
`scene` command group.

Leaves:
  list     scenes in display order, current program scene marked
  current  program scene (or preview with --preview)
  switch   make a scene the program (or preview) scene
  create   add an empty scene
  remove   delete a scene
*/

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::Table;
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct SceneArgs {
    #[command(subcommand)]
    pub command: SceneCommand,
}

#[derive(Subcommand, Debug)]
pub enum SceneCommand {
    /// List all scenes
    #[command(visible_alias = "ls")]
    List {
        /// Show scene UUIDs
        #[arg(long)]
        uuid: bool,
    },

    /// Print the current scene
    #[command(visible_alias = "c")]
    Current {
        /// Print the preview scene instead (studio mode)
        #[arg(long)]
        preview: bool,
    },

    /// Switch to a scene
    #[command(visible_alias = "sw")]
    Switch {
        /// Scene to switch to
        scene_name: String,

        /// Switch the preview scene instead (studio mode)
        #[arg(long)]
        preview: bool,
    },

    /// Create a new scene
    #[command(visible_alias = "new")]
    Create {
        /// Name of the new scene
        scene_name: String,
    },

    /// Remove a scene
    #[command(visible_alias = "rm")]
    Remove {
        /// Scene to remove
        scene_name: String,
    },
}

pub async fn execute_scene<T: Transport>(args: SceneArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        SceneCommand::List { uuid } => list(ctx, uuid).await,
        SceneCommand::Current { preview } => {
            let name = if preview {
                ctx.client
                    .scenes()
                    .current_preview()
                    .await
                    .context("failed to get current preview scene")?
            } else {
                ctx.client
                    .scenes()
                    .current_program()
                    .await
                    .context("failed to get current program scene")?
            };
            ctx.print(name)
        }
        SceneCommand::Switch {
            scene_name,
            preview,
        } => {
            if preview {
                ctx.client
                    .scenes()
                    .set_current_preview(&scene_name)
                    .await
                    .with_context(|| format!("failed to switch preview scene to {scene_name}"))?;
                ctx.print(format!("Switched to preview scene: {scene_name}"))
            } else {
                ctx.client
                    .scenes()
                    .set_current_program(&scene_name)
                    .await
                    .with_context(|| format!("failed to switch program scene to {scene_name}"))?;
                ctx.print(format!("Switched to program scene: {scene_name}"))
            }
        }
        SceneCommand::Create { scene_name } => {
            ctx.client
                .scenes()
                .create(&scene_name)
                .await
                .with_context(|| format!("failed to create scene {scene_name}"))?;
            ctx.print(format!("Created scene: {scene_name}"))
        }
        SceneCommand::Remove { scene_name } => {
            ctx.client
                .scenes()
                .remove(&scene_name)
                .await
                .with_context(|| format!("failed to remove scene {scene_name}"))?;
            ctx.print(format!("Removed scene: {scene_name}"))
        }
    }
}

async fn list<T: Transport>(ctx: &mut Context<'_, T>, uuid: bool) -> Result<()> {
    let list = ctx
        .client
        .scenes()
        .list()
        .await
        .context("failed to get scene list")?;
    let current = ctx
        .client
        .scenes()
        .current_program()
        .await
        .context("failed to get current program scene")?;

    let mut table = if uuid {
        Table::new(&["Scene Name", "Active", "UUID"])
    } else {
        Table::new(&["Scene Name", "Active"])
    };

    // OBS reports scenes bottom-up.
    for scene in list.scenes.into_iter().rev() {
        let active = if scene.scene_name == current {
            ctx.style.mark(true)
        } else {
            String::new()
        };
        let mut row = vec![scene.scene_name, active];
        if uuid {
            row.push(scene.scene_uuid);
        }
        table.row(row);
    }
    ctx.table(&table)
}
