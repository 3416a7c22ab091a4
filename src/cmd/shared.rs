/*!
shared.rs - plumbing used by every leaf handler.

Focus:
  - Context: client + output sink + style, bound once per run
  - lookup: fetch a collection, scan for a name, NotFound otherwise
  - scene_or_current: omitted scene/source resolves to the program scene
  - merge_input_setting: read the full settings map, overlay one key, write it back
  - device_property: probe `device` then `device_id`
  - run_session: run one command, close the session exactly once
*/

use anyhow::{Context as _, Result};
use futures_util::FutureExt;
use serde_json::Value;
use std::fmt::Display;
use std::io::Write;
use std::panic::AssertUnwindSafe;

use crate::Commands;
use crate::error::CliError;
use crate::obs::types::PropertyItem;
use crate::obs::{Client, Transport};
use crate::{log_debug, log_error};

use super::format::{Style, Table};

/* ---- Context ---- */

/// Everything a leaf handler touches.
pub struct Context<'a, T> {
    pub client: &'a mut Client<T>,
    pub out: &'a mut dyn Write,
    pub style: &'a Style,
}

impl<T: Transport> Context<'_, T> {
    /// Write one line to the output sink.
    pub fn print(&mut self, msg: impl Display) -> Result<()> {
        writeln!(self.out, "{msg}").context("failed to write output")
    }

    pub fn table(&mut self, table: &Table) -> Result<()> {
        let rendered = table.render(self.style);
        self.print(rendered)
    }

    /// Resolve an omitted scene or source to the current program scene.
    pub async fn scene_or_current(&mut self, scene: Option<String>) -> Result<String> {
        match scene {
            Some(name) => Ok(name),
            None => self
                .client
                .scenes()
                .current_program()
                .await
                .context("failed to get current program scene"),
        }
    }
}

/* ---- Lookup ---- */

/// Scan `items` for the first match, NotFound naming `kind` and `name` otherwise.
pub fn lookup<E>(
    items: impl IntoIterator<Item = E>,
    kind: &'static str,
    name: &str,
    matches: impl Fn(&E) -> bool,
) -> Result<E, CliError> {
    items
        .into_iter()
        .find(|item| matches(item))
        .ok_or_else(|| CliError::not_found(kind, name))
}

/* ---- Input settings ---- */

/// Overlay `key = value` onto the full settings map of `input` and write the
/// whole map back.
pub async fn merge_input_setting<T: Transport>(
    client: &mut Client<T>,
    input: &str,
    key: &str,
    value: Value,
) -> Result<()> {
    let mut settings = client
        .inputs()
        .settings(input)
        .await
        .with_context(|| format!("failed to get settings for input {input}"))?
        .input_settings;
    settings.insert(key.to_string(), value);
    client
        .inputs()
        .set_settings(input, settings, false)
        .await
        .with_context(|| format!("failed to update settings for input {input}"))
}

/// Candidate names for an input's capture device property.
pub const DEVICE_PROPERTIES: [&str; 2] = ["device", "device_id"];

/// First device property `input` exposes with a non-empty item list.
/// Inputs without one yield `None`.
pub async fn device_property<T: Transport>(
    client: &mut Client<T>,
    input: &str,
) -> Result<Option<(&'static str, Vec<PropertyItem>)>> {
    for property in DEVICE_PROPERTIES {
        match client.inputs().property_items(input, property).await {
            Ok(items) if !items.is_empty() => return Ok(Some((property, items))),
            Ok(_) => log_debug!("input {input} lists no {property} items"),
            Err(e) if e.code().is_some() => {
                log_debug!("input {input} has no {property} property: {e}");
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to get {property} items for input {input}"));
            }
        }
    }
    Ok(None)
}

/* ---- Session ---- */

/// Run `command` and close the session exactly once, whatever the outcome.
///
/// A close failure is logged and never replaces the command's own result. A
/// panic inside the command still closes the session before it resumes.
pub async fn run_session<T: Transport>(
    mut client: Client<T>,
    command: Commands,
    out: &mut dyn Write,
    style: &Style,
) -> Result<()> {
    let outcome = {
        let mut ctx = Context {
            client: &mut client,
            out,
            style,
        };
        AssertUnwindSafe(super::execute(command, &mut ctx))
            .catch_unwind()
            .await
    };

    if let Err(e) = client.disconnect().await {
        log_error!("failed to close OBS session: {e}");
    }

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
