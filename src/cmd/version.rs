//! `obs-version`: OBS and obs-websocket versions.

use anyhow::{Context as _, Result};

use crate::cmd::Context;
use crate::obs::Transport;

pub async fn execute_version<T: Transport>(ctx: &mut Context<'_, T>) -> Result<()> {
    let version = ctx
        .client
        .general()
        .version()
        .await
        .context("failed to get OBS version")?;
    ctx.print(format_args!(
        "OBS Client Version: {} with Websocket Version: {}",
        version.obs_version, version.obs_web_socket_version
    ))
}
