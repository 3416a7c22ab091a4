/*!
`scene-item` command group.

Items are addressed by scene and source name. With `--group` the item is
looked up among the children of that group instead, and every follow-up
request uses the group as its scene.

Leaves:
  list       items of a scene (default: current program scene), groups expanded
  show/hide  set visibility
  toggle     flip visibility (read, then write)
  visible    report visibility
  transform  overlay transform flags onto the current transform
*/

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{Align, Table};
use crate::cmd::shared::lookup;
use crate::obs::Transport;
use crate::obs::types::SceneItemTransform;

#[derive(Args, Debug)]
pub struct SceneItemArgs {
    #[command(subcommand)]
    pub command: SceneItemCommand,
}

/// Scene, item and optional parent group.
#[derive(Args, Debug, Clone)]
pub struct ItemTarget {
    /// Scene containing the item
    pub scene: String,

    /// Source name of the item
    pub item: String,

    /// Group the item belongs to
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SceneItemCommand {
    /// List items in a scene
    #[command(visible_alias = "ls")]
    List {
        /// Scene to list (default: current program scene)
        scene: Option<String>,

        /// Show source UUIDs
        #[arg(long)]
        uuid: bool,
    },

    /// Make an item visible
    #[command(visible_alias = "sh")]
    Show(ItemTarget),

    /// Hide an item
    #[command(visible_alias = "h")]
    Hide(ItemTarget),

    /// Toggle item visibility
    #[command(visible_alias = "tg")]
    Toggle(ItemTarget),

    /// Report item visibility
    #[command(visible_alias = "v")]
    Visible(ItemTarget),

    /// Change an item's transform
    #[command(visible_alias = "t")]
    Transform {
        #[command(flatten)]
        target: ItemTarget,

        #[command(flatten)]
        transform: TransformFlags,
    },
}

/// Transform overrides. Omitted and zero values keep the current setting.
#[derive(Args, Debug, Clone, Default)]
pub struct TransformFlags {
    #[arg(long)]
    pub alignment: Option<f64>,
    #[arg(long)]
    pub bounds_alignment: Option<f64>,
    #[arg(long)]
    pub bounds_height: Option<f64>,
    /// e.g. OBS_BOUNDS_STRETCH, OBS_BOUNDS_SCALE_INNER
    #[arg(long)]
    pub bounds_type: Option<String>,
    #[arg(long)]
    pub bounds_width: Option<f64>,
    #[arg(long)]
    pub crop_to_bounds: bool,
    #[arg(long)]
    pub crop_bottom: Option<f64>,
    #[arg(long)]
    pub crop_left: Option<f64>,
    #[arg(long)]
    pub crop_right: Option<f64>,
    #[arg(long)]
    pub crop_top: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub position_x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub position_y: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub rotation: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub scale_x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub scale_y: Option<f64>,
}

impl TransformFlags {
    fn apply(&self, t: &mut SceneItemTransform) {
        let fields = [
            (self.alignment, &mut t.alignment),
            (self.bounds_alignment, &mut t.bounds_alignment),
            (self.bounds_height, &mut t.bounds_height),
            (self.bounds_width, &mut t.bounds_width),
            (self.crop_bottom, &mut t.crop_bottom),
            (self.crop_left, &mut t.crop_left),
            (self.crop_right, &mut t.crop_right),
            (self.crop_top, &mut t.crop_top),
            (self.position_x, &mut t.position_x),
            (self.position_y, &mut t.position_y),
            (self.rotation, &mut t.rotation),
            (self.scale_x, &mut t.scale_x),
            (self.scale_y, &mut t.scale_y),
        ];
        for (flag, slot) in fields {
            if let Some(v) = flag
                && v != 0.0
            {
                *slot = v;
            }
        }
        if let Some(kind) = self.bounds_type.as_deref().filter(|k| !k.is_empty()) {
            t.bounds_type = kind.to_string();
        }
        if self.crop_to_bounds {
            t.crop_to_bounds = true;
        }
    }
}

impl ItemTarget {
    /// "scene 'S'" or "group 'G'", for messages.
    fn place(&self) -> String {
        match &self.group {
            Some(group) => format!("group '{group}'"),
            None => format!("scene '{}'", self.scene),
        }
    }
}

pub async fn execute_scene_item<T: Transport>(
    args: SceneItemArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        SceneItemCommand::List { scene, uuid } => list(ctx, scene, uuid).await,
        SceneItemCommand::Show(target) => set_visible(ctx, &target, true).await,
        SceneItemCommand::Hide(target) => set_visible(ctx, &target, false).await,
        SceneItemCommand::Toggle(target) => {
            let (scene, id) = resolve(ctx, &target).await?;
            let enabled = ctx
                .client
                .scene_items()
                .enabled(&scene, id)
                .await
                .with_context(|| format!("failed to get visibility of {}", target.item))?;
            write_visible(ctx, &target, &scene, id, !enabled).await
        }
        SceneItemCommand::Visible(target) => {
            let (scene, id) = resolve(ctx, &target).await?;
            let enabled = ctx
                .client
                .scene_items()
                .enabled(&scene, id)
                .await
                .with_context(|| format!("failed to get visibility of {}", target.item))?;
            let state = if enabled { "visible" } else { "hidden" };
            ctx.print(format!(
                "Scene item '{}' in {} is {state}.",
                target.item,
                target.place()
            ))
        }
        SceneItemCommand::Transform { target, transform } => {
            let (scene, id) = resolve(ctx, &target).await?;
            let mut current = ctx
                .client
                .scene_items()
                .transform(&scene, id)
                .await
                .with_context(|| format!("failed to get transform of {}", target.item))?;
            transform.apply(&mut current);
            ctx.client
                .scene_items()
                .set_transform(&scene, id, &current)
                .await
                .with_context(|| format!("failed to set transform of {}", target.item))?;
            ctx.print(format!(
                "Scene item '{}' in {} transformed.",
                target.item,
                target.place()
            ))
        }
    }
}

/// Scene (or group) name and numeric id of the addressed item.
async fn resolve<T: Transport>(ctx: &mut Context<'_, T>, target: &ItemTarget) -> Result<(String, i64)> {
    let owner = target.group.as_deref().unwrap_or(&target.scene).to_string();
    let items = match &target.group {
        Some(group) => ctx.client.scene_items().group_list(group).await,
        None => ctx.client.scene_items().list(&target.scene).await,
    }
    .with_context(|| format!("failed to list items of {}", target.place()))?;

    let item = lookup(items, "scene item", &target.item, |i| {
        i.source_name == target.item
    })?;
    Ok((owner, item.scene_item_id))
}

async fn set_visible<T: Transport>(
    ctx: &mut Context<'_, T>,
    target: &ItemTarget,
    visible: bool,
) -> Result<()> {
    let (scene, id) = resolve(ctx, target).await?;
    write_visible(ctx, target, &scene, id, visible).await
}

async fn write_visible<T: Transport>(
    ctx: &mut Context<'_, T>,
    target: &ItemTarget,
    scene: &str,
    id: i64,
    visible: bool,
) -> Result<()> {
    ctx.client
        .scene_items()
        .set_enabled(scene, id, visible)
        .await
        .with_context(|| format!("failed to set visibility of {}", target.item))?;
    let state = if visible { "visible" } else { "hidden" };
    ctx.print(format!(
        "Scene item '{}' in {} is now {state}.",
        target.item,
        target.place()
    ))
}

async fn list<T: Transport>(ctx: &mut Context<'_, T>, scene: Option<String>, uuid: bool) -> Result<()> {
    let scene = ctx.scene_or_current(scene).await?;
    let mut items = ctx
        .client
        .scene_items()
        .list(&scene)
        .await
        .with_context(|| format!("failed to list items of scene {scene}"))?;
    if items.is_empty() {
        return ctx.print(format!("No scene items found in scene '{scene}'."));
    }
    items.sort_by_key(|i| i.scene_item_id);

    let mut headers = vec!["Item ID", "Item Name", "In Group", "Enabled"];
    if uuid {
        headers.push("UUID");
    }
    let mut table = Table::new(&headers).align(&[Align::Center, Align::Left, Align::Left, Align::Center]);

    for item in items {
        let mut row = vec![
            item.scene_item_id.to_string(),
            item.source_name.clone(),
            String::new(),
            ctx.style.mark(item.scene_item_enabled),
        ];
        if uuid {
            row.push(item.source_uuid.clone());
        }
        table.row(row);

        if !item.is_group() {
            continue;
        }
        let mut children = ctx
            .client
            .scene_items()
            .group_list(&item.source_name)
            .await
            .with_context(|| format!("failed to list items of group {}", item.source_name))?;
        children.sort_by_key(|c| c.scene_item_id);
        for child in children {
            let mut row = vec![
                child.scene_item_id.to_string(),
                child.source_name,
                item.source_name.clone(),
                ctx.style
                    .mark(item.scene_item_enabled && child.scene_item_enabled),
            ];
            if uuid {
                row.push(child.source_uuid);
            }
            table.row(row);
        }
    }
    ctx.table(&table)
}
