//! `screenshot save`: the image format comes from the file extension.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use std::path::Path;

use crate::cmd::Context;
use crate::error::CliError;
use crate::obs::{Screenshot, Transport};

#[derive(Args, Debug)]
pub struct ScreenshotArgs {
    #[command(subcommand)]
    pub command: ScreenshotCommand,
}

#[derive(Subcommand, Debug)]
pub enum ScreenshotCommand {
    /// Save a screenshot of a source to a file
    #[command(visible_alias = "sv")]
    Save {
        /// Source to capture
        source: String,
        /// Destination file; the extension selects the format (png, jpg, ...)
        path: String,
        /// Width in pixels
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        /// Height in pixels
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
        /// Compression quality 0-100, -1 for the encoder default
        #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
        quality: f64,
    },
}

pub async fn execute_screenshot<T: Transport>(
    args: ScreenshotArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    let ScreenshotCommand::Save {
        source,
        path,
        width,
        height,
        quality,
    } = args.command;

    let format = image_format(&path)?;
    let shot = Screenshot {
        source: &source,
        format: &format,
        path: &path,
        width,
        height,
        quality,
    };
    ctx.client
        .sources()
        .save_screenshot(&shot)
        .await
        .with_context(|| format!("failed to take screenshot of {source}"))?;
    ctx.print(format!("Screenshot saved to {}.", ctx.style.highlight(&path)))
}

fn image_format(path: &str) -> Result<String, CliError> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
        .ok_or_else(|| CliError::Validation(format!("cannot tell image format of '{path}' without an extension")))
}
