/*!
`input` command group.

Leaves:
  create   new input of a kind inside a scene (default: current program scene)
  remove   delete an input everywhere
  kinds    available input kinds
  list     all inputs, optional kind filters
  mute / unmute / toggle
  show     kind and capture device, optionally every selectable device
  update   switch the capture device (full settings map is written back)
  volume   read or set the volume in dB

Notes:
  - Inputs without audio answer mute queries with InvalidResourceState (604);
    `list` shows `N/A` for those instead of failing.
  - Volume is accepted in [-90, 0] dB and checked before any request.
*/

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{Align, Table, snake_case_to_title_case};
use crate::cmd::shared::{device_property, lookup, merge_input_setting};
use crate::error::CliError;
use crate::obs::Transport;
use crate::obs::status::INVALID_RESOURCE_STATE;

pub const MIN_VOLUME_DB: f64 = -90.0;
pub const MAX_VOLUME_DB: f64 = 0.0;

#[derive(Args, Debug)]
pub struct InputArgs {
    #[command(subcommand)]
    pub command: InputCommand,
}

#[derive(Subcommand, Debug)]
pub enum InputCommand {
    /// Create an input
    #[command(visible_alias = "c")]
    Create {
        /// Name for the input
        name: String,
        /// Input kind (e.g. coreaudio_input_capture, ffmpeg_source)
        kind: String,
        /// Scene to add the input to (default: current program scene)
        #[arg(long)]
        scene: Option<String>,
    },

    /// Remove an input
    #[command(visible_aliases = ["d", "delete"])]
    Remove {
        /// Input to remove
        name: String,
    },

    /// List available input kinds
    #[command(visible_alias = "k")]
    Kinds,

    /// List inputs
    #[command(visible_alias = "ls")]
    List(ListFilters),

    /// Mute an input
    #[command(visible_alias = "m")]
    Mute {
        /// Input to mute
        name: String,
    },

    /// Unmute an input
    #[command(visible_alias = "um")]
    Unmute {
        /// Input to unmute
        name: String,
    },

    /// Toggle an input's mute state
    #[command(visible_alias = "tg")]
    Toggle {
        /// Input to toggle
        name: String,
    },

    /// Show input details
    #[command(visible_alias = "s")]
    Show {
        /// Input to show
        name: String,
        /// Also list every selectable device
        #[arg(long)]
        devices: bool,
    },

    /// Switch an input's capture device
    #[command(visible_alias = "up")]
    Update {
        /// Input to update
        name: String,
        /// Device name as listed by `input show --devices`
        device: String,
    },

    /// Get or set an input's volume in dB
    #[command(visible_alias = "vol")]
    Volume {
        /// Input to adjust
        name: String,
        /// New volume in dB, between -90 and 0
        #[arg(allow_negative_numbers = true)]
        db: Option<f64>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListFilters {
    /// Only inputs whose kind contains "input"
    #[arg(long)]
    pub input: bool,
    /// Only inputs whose kind contains "output"
    #[arg(long)]
    pub output: bool,
    /// Only colour sources
    #[arg(long)]
    pub colour: bool,
    /// Only ffmpeg sources
    #[arg(long)]
    pub ffmpeg: bool,
    /// Only VLC sources
    #[arg(long)]
    pub vlc: bool,
    /// Show input UUIDs
    #[arg(long)]
    pub uuid: bool,
}

impl ListFilters {
    fn keywords(&self) -> Vec<&'static str> {
        [
            (self.input, "input"),
            (self.output, "output"),
            (self.colour, "color"),
            (self.ffmpeg, "ffmpeg"),
            (self.vlc, "vlc"),
        ]
        .into_iter()
        .filter_map(|(on, kw)| on.then_some(kw))
        .collect()
    }
}

pub fn check_volume(db: f64) -> Result<f64, CliError> {
    if !(MIN_VOLUME_DB..=MAX_VOLUME_DB).contains(&db) {
        return Err(CliError::Validation(format!(
            "volume {db} dB is out of range, expected {MIN_VOLUME_DB} to {MAX_VOLUME_DB}"
        )));
    }
    Ok(db)
}

pub async fn execute_input<T: Transport>(args: InputArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        InputCommand::Create { name, kind, scene } => {
            let scene = ctx.scene_or_current(scene).await?;
            ctx.client
                .inputs()
                .create(&scene, &name, &kind)
                .await
                .with_context(|| format!("failed to create input {name}"))?;
            ctx.print(format!(
                "Created input: {} ({kind}) in scene {}",
                ctx.style.highlight(&name),
                ctx.style.highlight(&scene)
            ))
        }
        InputCommand::Remove { name } => {
            ctx.client
                .inputs()
                .remove(&name)
                .await
                .with_context(|| format!("failed to delete input {name}"))?;
            ctx.print(format!("Deleted {}", ctx.style.highlight(&name)))
        }
        InputCommand::Kinds => {
            let kinds = ctx
                .client
                .inputs()
                .kinds()
                .await
                .context("failed to get input kinds")?;
            let mut table = Table::new(&["Kind"]);
            for kind in kinds {
                table.row([kind]);
            }
            ctx.table(&table)
        }
        InputCommand::List(filters) => list(ctx, &filters).await,
        InputCommand::Mute { name } => set_muted(ctx, &name, true).await,
        InputCommand::Unmute { name } => set_muted(ctx, &name, false).await,
        InputCommand::Toggle { name } => {
            let muted = ctx
                .client
                .inputs()
                .muted(&name)
                .await
                .with_context(|| format!("failed to get mute state of input {name}"))?;
            set_muted(ctx, &name, !muted).await
        }
        InputCommand::Show { name, devices } => show(ctx, &name, devices).await,
        InputCommand::Update { name, device } => update(ctx, &name, &device).await,
        InputCommand::Volume { name, db: None } => {
            let volume = ctx
                .client
                .inputs()
                .volume(&name)
                .await
                .with_context(|| format!("failed to get volume of input {name}"))?;
            ctx.print(format!(
                "Volume of input {}: {:.1} dB",
                ctx.style.highlight(&name),
                volume.input_volume_db
            ))
        }
        InputCommand::Volume { name, db: Some(db) } => {
            let db = check_volume(db)?;
            ctx.client
                .inputs()
                .set_volume_db(&name, db)
                .await
                .with_context(|| format!("failed to set volume of input {name}"))?;
            ctx.print(format!(
                "Set volume of input {} to {db:.1} dB",
                ctx.style.highlight(&name)
            ))
        }
    }
}

async fn set_muted<T: Transport>(ctx: &mut Context<'_, T>, name: &str, muted: bool) -> Result<()> {
    ctx.client
        .inputs()
        .set_muted(name, muted)
        .await
        .with_context(|| format!("failed to set mute state of input {name}"))?;
    let verb = if muted { "Muted" } else { "Unmuted" };
    ctx.print(format!("{verb} input: {}", ctx.style.highlight(name)))
}

async fn list<T: Transport>(ctx: &mut Context<'_, T>, filters: &ListFilters) -> Result<()> {
    let mut inputs = ctx
        .client
        .inputs()
        .list()
        .await
        .context("failed to get input list")?;
    inputs.sort_by(|a, b| a.input_name.cmp(&b.input_name));

    let keywords = filters.keywords();
    let mut headers = vec!["Input Name", "Kind", "Muted"];
    if filters.uuid {
        headers.push("UUID");
    }
    let mut table = Table::new(&headers).align(&[Align::Left, Align::Left, Align::Center]);

    for input in inputs {
        let kind = if keywords.is_empty() {
            snake_case_to_title_case(&input.input_kind)
        } else if keywords.iter().any(|kw| input.input_kind.contains(kw)) {
            input.input_kind.clone()
        } else {
            continue;
        };

        let muted = match ctx.client.inputs().muted(&input.input_name).await {
            Ok(muted) => ctx.style.mark(muted),
            Err(e) if e.code() == Some(INVALID_RESOURCE_STATE) => "N/A".to_string(),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to get mute state of input {}", input.input_name)
                });
            }
        };

        let mut row = vec![input.input_name, kind, muted];
        if filters.uuid {
            row.push(input.input_uuid);
        }
        table.row(row);
    }
    ctx.table(&table)
}

async fn show<T: Transport>(ctx: &mut Context<'_, T>, name: &str, devices: bool) -> Result<()> {
    let inputs = ctx
        .client
        .inputs()
        .list()
        .await
        .context("failed to get input list")?;
    let input = lookup(inputs, "input", name, |i| i.input_name == name)?;

    let found = device_property(ctx.client, name).await?;
    let current_device = match &found {
        Some((property, items)) => {
            let settings = ctx
                .client
                .inputs()
                .settings(name)
                .await
                .with_context(|| format!("failed to get settings for input {name}"))?
                .input_settings;
            let selected = settings.get(*property);
            items
                .iter()
                .find(|i| !i.item_name.is_empty() && Some(&i.item_value) == selected)
                .or_else(|| items.iter().find(|i| !i.item_name.is_empty()))
                .map(|i| i.item_name.clone())
                .unwrap_or_default()
        }
        None => String::new(),
    };

    let mut table = Table::new(&["Input Name", "Kind", "Device"]).align(&[
        Align::Left,
        Align::Left,
        Align::Center,
    ]);
    table.row([
        input.input_name,
        snake_case_to_title_case(&input.input_kind),
        current_device,
    ]);
    ctx.table(&table)?;

    if devices && let Some((_, items)) = found {
        let mut table = Table::new(&["Devices"]);
        for item in items.into_iter().filter(|i| !i.item_name.is_empty()) {
            table.row([item.item_name]);
        }
        ctx.table(&table)?;
    }
    Ok(())
}

async fn update<T: Transport>(ctx: &mut Context<'_, T>, name: &str, device: &str) -> Result<()> {
    let (property, items) = device_property(ctx.client, name)
        .await?
        .ok_or_else(|| CliError::Validation(format!("no device property found for input '{name}'")))?;
    let item = items
        .into_iter()
        .find(|i| i.item_name == device)
        .ok_or_else(|| CliError::not_found("device", device))
        .with_context(|| format!("cannot update input {name}"))?;

    merge_input_setting(ctx.client, name, property, item.item_value).await?;
    ctx.print(format!(
        "Input {} {property} set to {}",
        ctx.style.highlight(name),
        ctx.style.highlight(device)
    ))
}
