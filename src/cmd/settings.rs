/*!
`settings` command group.

Leaves:
  show            video, record directory and well-known profile parameters
  profile         read or write one profile parameter
  stream-service  print the stream service, or update key/server
  video           print (--show) or update canvas/output size and frame rate

Updates are read-modify-write: every field the user did not pass keeps the
value OBS currently reports.
*/

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::cmd::Context;
use crate::cmd::format::{Align, Table};
use crate::obs::Transport;
use crate::obs::types::VideoSettings;
use crate::log_debug;

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show settings (all tables unless one is selected)
    #[command(visible_alias = "s")]
    Show {
        /// Show video settings
        #[arg(long)]
        video: bool,
        /// Show the recording directory
        #[arg(long)]
        record: bool,
        /// Show well-known profile parameters
        #[arg(long)]
        profile: bool,
    },

    /// Get or set a profile parameter
    #[command(visible_alias = "p")]
    Profile {
        /// Parameter category (e.g. AdvOut, SimpleOutput, Output)
        category: String,
        /// Parameter name (e.g. RecFormat2, RecEncoder)
        name: String,
        /// New value
        value: Option<String>,
    },

    /// Get or set the stream service
    #[command(name = "stream-service", visible_alias = "ss")]
    StreamService {
        /// Stream service type (e.g. rtmp_common, rtmp_custom)
        kind: String,
        /// Stream key
        #[arg(long, env = "OBS_STREAM_KEY", hide_env_values = true)]
        key: Option<String>,
        /// Stream server URL
        #[arg(long)]
        server: Option<String>,
    },

    /// Get or set video settings
    #[command(visible_alias = "v")]
    Video(VideoFlags),
}

#[derive(Args, Debug, Clone, Default)]
pub struct VideoFlags {
    /// Print the current video settings
    #[arg(long)]
    pub show: bool,
    /// Base (canvas) width
    #[arg(long, value_parser = clap::value_parser!(u32).range(8..))]
    pub base_width: Option<u32>,
    /// Base (canvas) height
    #[arg(long, value_parser = clap::value_parser!(u32).range(8..))]
    pub base_height: Option<u32>,
    /// Output (scaled) width
    #[arg(long, value_parser = clap::value_parser!(u32).range(8..))]
    pub output_width: Option<u32>,
    /// Output (scaled) height
    #[arg(long, value_parser = clap::value_parser!(u32).range(8..))]
    pub output_height: Option<u32>,
    /// Frames per second numerator
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps_num: Option<u32>,
    /// Frames per second denominator
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps_den: Option<u32>,
}

impl VideoFlags {
    fn apply(&self, current: VideoSettings) -> VideoSettings {
        VideoSettings {
            base_width: self.base_width.unwrap_or(current.base_width),
            base_height: self.base_height.unwrap_or(current.base_height),
            output_width: self.output_width.unwrap_or(current.output_width),
            output_height: self.output_height.unwrap_or(current.output_height),
            fps_numerator: self.fps_num.unwrap_or(current.fps_numerator),
            fps_denominator: self.fps_den.unwrap_or(current.fps_denominator),
        }
    }
}

/// Profile parameters shown by `settings show`: category, name, label.
const PROFILE_PARAMETERS: &[(&str, &str, &str)] = &[
    ("Output", "Mode", "Output Mode"),
    ("SimpleOutput", "StreamEncoder", "Simple Streaming Encoder"),
    ("SimpleOutput", "RecEncoder", "Simple Recording Encoder"),
    ("SimpleOutput", "RecFormat2", "Simple Recording Video Format"),
    ("SimpleOutput", "RecAudioEncoder", "Simple Recording Audio Format"),
    ("SimpleOutput", "RecQuality", "Simple Recording Quality"),
    ("AdvOut", "Encoder", "Advanced Streaming Encoder"),
    ("AdvOut", "RecEncoder", "Advanced Recording Encoder"),
    ("AdvOut", "RecType", "Advanced Recording Type"),
    ("AdvOut", "RecFormat2", "Advanced Recording Video Format"),
    ("AdvOut", "RecAudioEncoder", "Advanced Recording Audio Format"),
];

pub async fn execute_settings<T: Transport>(
    args: SettingsArgs,
    ctx: &mut Context<'_, T>,
) -> Result<()> {
    match args.command {
        SettingsCommand::Show {
            video,
            record,
            profile,
        } => {
            let all = !(video || record || profile);
            if all || video {
                let current = video_settings(ctx).await?;
                ctx.table(&video_table(&current))?;
            }
            if all || record {
                let dir = ctx
                    .client
                    .config()
                    .record_directory()
                    .await
                    .context("failed to get record directory")?;
                let mut table = Table::new(&["Record Setting", "Value"]);
                table.row(["Directory".to_string(), dir]);
                ctx.table(&table)?;
            }
            if all || profile {
                let table = profile_table(ctx).await?;
                if table.is_empty() {
                    ctx.print("No profile parameters set.")?;
                } else {
                    ctx.table(&table)?;
                }
            }
            Ok(())
        }
        SettingsCommand::Profile {
            category,
            name,
            value: None,
        } => {
            let param = ctx
                .client
                .config()
                .profile_parameter(&category, &name)
                .await
                .with_context(|| format!("failed to get parameter {category}.{name}"))?;
            let value = param.parameter_value.unwrap_or_default();
            ctx.print(format!("{category}.{name} = {value}"))
        }
        SettingsCommand::Profile {
            category,
            name,
            value: Some(value),
        } => {
            ctx.client
                .config()
                .set_profile_parameter(&category, &name, &value)
                .await
                .with_context(|| format!("failed to set parameter {category}.{name}"))?;
            ctx.print(format!("Set {category}.{name} = {value}"))
        }
        SettingsCommand::StreamService { kind, key, server } => {
            let current = ctx
                .client
                .config()
                .stream_service_settings()
                .await
                .context("failed to get stream service settings")?;

            if key.is_none() && server.is_none() {
                let mut table = Table::new(&["Stream Service Setting", "Value"]);
                table
                    .row(["Type".to_string(), current.stream_service_type.clone()])
                    .row(["Key".to_string(), current.field("key")])
                    .row(["Server".to_string(), current.field("server")]);
                return ctx.table(&table);
            }

            let mut settings = current.stream_service_settings;
            if let Some(key) = key {
                settings.insert("key".into(), Value::String(key));
            }
            if let Some(server) = server {
                settings.insert("server".into(), Value::String(server));
            }
            ctx.client
                .config()
                .set_stream_service_settings(&kind, settings)
                .await
                .context("failed to set stream service settings")?;
            ctx.print("Stream service settings updated successfully.")
        }
        SettingsCommand::Video(flags) => {
            let current = video_settings(ctx).await?;
            if flags.show {
                return ctx.table(&video_table(&current));
            }
            ctx.client
                .config()
                .set_video_settings(&flags.apply(current))
                .await
                .context("failed to set video settings")?;
            ctx.print("Video settings updated successfully.")
        }
    }
}

async fn video_settings<T: Transport>(ctx: &mut Context<'_, T>) -> Result<VideoSettings> {
    ctx.client
        .config()
        .video_settings()
        .await
        .context("failed to get video settings")
}

fn video_table(v: &VideoSettings) -> Table {
    let mut table = Table::new(&["Video Setting", "Value"]).align(&[Align::Left, Align::Right]);
    for (label, value) in [
        ("Base Width", v.base_width),
        ("Base Height", v.base_height),
        ("Output Width", v.output_width),
        ("Output Height", v.output_height),
        ("FPS Numerator", v.fps_numerator),
        ("FPS Denominator", v.fps_denominator),
    ] {
        table.row([label.to_string(), value.to_string()]);
    }
    table
}

/// Empty parameters and ones OBS refuses with a status code are left out.
/// Transport failures and timeouts abort the listing.
async fn profile_table<T: Transport>(ctx: &mut Context<'_, T>) -> Result<Table> {
    let mut table = Table::new(&["Profile Parameter", "Value"]);
    for (category, name, label) in PROFILE_PARAMETERS {
        match ctx.client.config().profile_parameter(category, name).await {
            Ok(param) => {
                if let Some(value) = param.parameter_value.filter(|v| !v.is_empty()) {
                    table.row([label.to_string(), value]);
                }
            }
            Err(e) if e.code().is_some() => {
                log_debug!("skipping profile parameter {category}.{name}: {e}");
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to get parameter {category}.{name}"));
            }
        }
    }
    Ok(table)
}
