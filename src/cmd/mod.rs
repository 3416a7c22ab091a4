/*!
Command dispatcher.

Each command group lives in its own file and exposes one `XxxArgs` struct
(clap derive, with a nested subcommand enum where the group has leaves) and
one `execute_xxx` function:

  version.rs          obs-version
  scene.rs            scene list/current/switch/create/remove
  scene_item.rs       scene-item list/show/hide/toggle/visible/transform
  group.rs            group list/show/hide/toggle/status
  input.rs            input create/remove/kinds/list/mute/unmute/toggle/show/update/volume
  text.rs             text current/update
  record.rs           record start/stop/toggle/status/pause/resume/directory/split/chapter
  stream.rs           stream start/stop/toggle/status
  scene_collection.rs scene-collection list/current/switch/create
  profile.rs          profile list/current/switch/create/remove
  replay_buffer.rs    replay-buffer start/stop/toggle/status/save
  studio_mode.rs      studio-mode enable/disable/toggle/status
  virtual_cam.rs      virtual-cam start/stop/toggle/status
  hotkey.rs           hotkey list/trigger/trigger-sequence
  filter.rs           filter list/enable/disable/toggle/status
  projector.rs        projector list-monitors/open
  screenshot.rs       screenshot save
  settings.rs         settings show/profile/stream-service/video
  media.rs            media cursor/play/pause/stop/restart
  completion.rs       completion (no connection)

Conventions:
  - `execute_*` functions are async, generic over the transport and return
    `anyhow::Result<()>`.
  - All output goes through `Context::print` / `Context::table`.
  - Remote failures are wrapped with `with_context` naming the operation.
*/

use anyhow::{Result, bail};

use crate::Commands;
use crate::obs::Transport;

pub mod completion;
pub mod filter;
pub mod format;
pub mod group;
pub mod hotkey;
pub mod input;
pub mod media;
pub mod profile;
pub mod projector;
pub mod record;
pub mod replay_buffer;
pub mod scene;
pub mod scene_collection;
pub mod scene_item;
pub mod screenshot;
pub mod settings;
pub mod shared;
pub mod stream;
pub mod studio_mode;
pub mod text;
pub mod version;
pub mod virtual_cam;

pub use shared::{Context, run_session};

/// Run exactly one leaf command against an open session.
pub async fn execute<T: Transport>(command: Commands, ctx: &mut Context<'_, T>) -> Result<()> {
    match command {
        Commands::ObsVersion => version::execute_version(ctx).await,
        Commands::Scene(args) => scene::execute_scene(args, ctx).await,
        Commands::SceneItem(args) => scene_item::execute_scene_item(args, ctx).await,
        Commands::Group(args) => group::execute_group(args, ctx).await,
        Commands::Input(args) => input::execute_input(args, ctx).await,
        Commands::Text(args) => text::execute_text(args, ctx).await,
        Commands::Record(args) => record::execute_record(args, ctx).await,
        Commands::Stream(args) => stream::execute_stream(args, ctx).await,
        Commands::SceneCollection(args) => {
            scene_collection::execute_scene_collection(args, ctx).await
        }
        Commands::Profile(args) => profile::execute_profile(args, ctx).await,
        Commands::ReplayBuffer(args) => replay_buffer::execute_replay_buffer(args, ctx).await,
        Commands::StudioMode(args) => studio_mode::execute_studio_mode(args, ctx).await,
        Commands::VirtualCam(args) => virtual_cam::execute_virtual_cam(args, ctx).await,
        Commands::Hotkey(args) => hotkey::execute_hotkey(args, ctx).await,
        Commands::Filter(args) => filter::execute_filter(args, ctx).await,
        Commands::Projector(args) => projector::execute_projector(args, ctx).await,
        Commands::Screenshot(args) => screenshot::execute_screenshot(args, ctx).await,
        Commands::Settings(args) => settings::execute_settings(args, ctx).await,
        Commands::Media(args) => media::execute_media(args, ctx).await,
        Commands::Completion(_) => bail!("completion runs without an OBS session"),
    }
}
