//! `group` command group: groups are scene items flagged `isGroup`.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{Align, Table};
use crate::cmd::shared::lookup;
use crate::obs::Transport;
use crate::obs::types::SceneItem;

#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Args, Debug, Clone)]
pub struct GroupTarget {
    /// Scene containing the group
    pub scene: String,
    /// Group name
    pub group: String,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// List groups in a scene
    #[command(visible_alias = "ls")]
    List {
        /// Scene to list (default: current program scene)
        scene: Option<String>,
    },
    /// Show a group
    #[command(visible_alias = "sh")]
    Show(GroupTarget),
    /// Hide a group
    #[command(visible_alias = "h")]
    Hide(GroupTarget),
    /// Toggle group visibility
    #[command(visible_alias = "tg")]
    Toggle(GroupTarget),
    /// Report group visibility
    #[command(visible_alias = "ss")]
    Status(GroupTarget),
}

pub async fn execute_group<T: Transport>(args: GroupArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        GroupCommand::List { scene } => {
            let scene = ctx.scene_or_current(scene).await?;
            let items = scene_items(ctx, &scene).await?;
            let mut table =
                Table::new(&["ID", "Group Name", "Enabled"]).align(&[Align::Center, Align::Left, Align::Center]);
            for item in items.into_iter().filter(SceneItem::is_group) {
                table.row([
                    item.scene_item_id.to_string(),
                    item.source_name,
                    ctx.style.mark(item.scene_item_enabled),
                ]);
            }
            if table.is_empty() {
                return ctx.print(format!("No groups found in scene '{scene}'."));
            }
            ctx.table(&table)
        }
        GroupCommand::Show(target) => set_shown(ctx, &target, true).await,
        GroupCommand::Hide(target) => set_shown(ctx, &target, false).await,
        GroupCommand::Toggle(target) => {
            let group = find_group(ctx, &target).await?;
            set_enabled(ctx, &target, group.scene_item_id, !group.scene_item_enabled).await
        }
        GroupCommand::Status(target) => {
            let group = find_group(ctx, &target).await?;
            let state = if group.scene_item_enabled { "shown" } else { "hidden" };
            ctx.print(format!("Group {} is {state}.", target.group))
        }
    }
}

async fn scene_items<T: Transport>(ctx: &mut Context<'_, T>, scene: &str) -> Result<Vec<SceneItem>> {
    ctx.client
        .scene_items()
        .list(scene)
        .await
        .with_context(|| format!("failed to list items of scene {scene}"))
}

async fn find_group<T: Transport>(ctx: &mut Context<'_, T>, target: &GroupTarget) -> Result<SceneItem> {
    let items = scene_items(ctx, &target.scene).await?;
    Ok(lookup(items, "group", &target.group, |i| {
        i.is_group() && i.source_name == target.group
    })?)
}

async fn set_shown<T: Transport>(ctx: &mut Context<'_, T>, target: &GroupTarget, shown: bool) -> Result<()> {
    let group = find_group(ctx, target).await?;
    set_enabled(ctx, target, group.scene_item_id, shown).await
}

async fn set_enabled<T: Transport>(
    ctx: &mut Context<'_, T>,
    target: &GroupTarget,
    id: i64,
    shown: bool,
) -> Result<()> {
    ctx.client
        .scene_items()
        .set_enabled(&target.scene, id, shown)
        .await
        .with_context(|| format!("failed to set visibility of group {}", target.group))?;
    let state = if shown { "shown" } else { "hidden" };
    ctx.print(format!("Group {} is now {state}.", target.group))
}
