//! `hotkey` command group.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::Table;
use crate::obs::{KeyModifiers, Transport};

#[derive(Args, Debug)]
pub struct HotkeyArgs {
    #[command(subcommand)]
    pub command: HotkeyCommand,
}

#[derive(Subcommand, Debug)]
pub enum HotkeyCommand {
    /// List hotkey names
    #[command(visible_alias = "ls")]
    List,

    /// Trigger a hotkey by name
    #[command(visible_alias = "tr")]
    Trigger {
        /// Hotkey name, e.g. OBSBasic.StartRecording
        name: String,
    },

    /// Trigger a key sequence
    #[command(visible_alias = "trs")]
    TriggerSequence {
        /// Key id, e.g. OBS_KEY_F1
        key_id: String,
        #[arg(long)]
        shift: bool,
        #[arg(long)]
        ctrl: bool,
        #[arg(long)]
        alt: bool,
        #[arg(long)]
        cmd: bool,
    },
}

pub async fn execute_hotkey<T: Transport>(args: HotkeyArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        HotkeyCommand::List => {
            let hotkeys = ctx
                .client
                .general()
                .hotkeys()
                .await
                .context("failed to get hotkey list")?;
            let mut table = Table::new(&["Hotkey Name"]);
            for name in hotkeys {
                table.row([name]);
            }
            ctx.table(&table)
        }
        HotkeyCommand::Trigger { name } => {
            ctx.client
                .general()
                .trigger_hotkey(&name)
                .await
                .with_context(|| format!("failed to trigger hotkey {name}"))?;
            ctx.print(format!("Triggered hotkey: {}", ctx.style.highlight(&name)))
        }
        HotkeyCommand::TriggerSequence {
            key_id,
            shift,
            ctrl,
            alt,
            cmd,
        } => {
            let mods = KeyModifiers {
                shift,
                control: ctrl,
                alt,
                command: cmd,
            };
            ctx.client
                .general()
                .trigger_key_sequence(&key_id, mods)
                .await
                .with_context(|| format!("failed to trigger key sequence {key_id}"))?;
            ctx.print(format!("Triggered key sequence: {}", ctx.style.highlight(&key_id)))
        }
    }
}
