use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

mod cmd;
mod config;
mod error;
mod obs;
mod utils;

use cmd::completion::CompletionArgs;
use cmd::filter::FilterArgs;
use cmd::group::GroupArgs;
use cmd::hotkey::HotkeyArgs;
use cmd::input::InputArgs;
use cmd::media::MediaArgs;
use cmd::profile::ProfileArgs;
use cmd::projector::ProjectorArgs;
use cmd::record::RecordArgs;
use cmd::replay_buffer::ReplayBufferArgs;
use cmd::scene::SceneArgs;
use cmd::scene_collection::SceneCollectionArgs;
use cmd::scene_item::SceneItemArgs;
use cmd::screenshot::ScreenshotArgs;
use cmd::settings::SettingsArgs;
use cmd::stream::StreamArgs;
use cmd::studio_mode::StudioModeArgs;
use cmd::text::TextArgs;
use cmd::virtual_cam::VirtualCamArgs;
use config::{ObsConfig, StyleConfig};

/// obsctl - control a running OBS Studio instance over obs-websocket v5.
///
/// Layout: obsctl [global flags] <group> <leaf> [args]
///   obsctl scene list
///   obsctl scene-item hide "Main" "Webcam"
///   obsctl input volume "Mic/Aux" -- -12.5
///   obsctl record start
///   obsctl settings video --output-width 1280 --output-height 720
///
/// Connection (flag > environment > ./.env > <config dir>/obsctl/config.env):
///   -H/--host OBS_HOST       default localhost
///   -P/--port OBS_PORT       default 4455
///   -p/--password OBS_PASSWORD
///   -T/--timeout OBS_TIMEOUT seconds, default 5
///
/// Output:
///   -s/--style OBSCTL_STYLE, -b/--no-border OBSCTL_STYLE_NO_BORDER,
///   --no-color (or NO_COLOR)
///   -v / -vv   more log detail on stderr, -q errors only
#[derive(Parser, Debug)]
#[command(
    name = "obsctl",
    version,
    author,
    about = "obsctl - command line control for OBS Studio (obs-websocket v5)",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    obs: ObsConfig,

    #[command(flatten)]
    style: StyleConfig,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show OBS and obs-websocket versions
    #[command(name = "obs-version", visible_alias = "v")]
    ObsVersion,

    /// Print a shell completion script
    #[command(visible_alias = "c")]
    Completion(CompletionArgs),

    /// Manage scenes
    #[command(visible_alias = "sc")]
    Scene(SceneArgs),

    /// Manage scene items
    #[command(visible_aliases = ["si", "sceneitem"])]
    SceneItem(SceneItemArgs),

    /// Manage groups in a scene
    #[command(visible_alias = "g")]
    Group(GroupArgs),

    /// Manage inputs
    #[command(visible_alias = "i")]
    Input(InputArgs),

    /// Read or update text sources
    #[command(visible_alias = "t")]
    Text(TextArgs),

    /// Control recording
    #[command(visible_alias = "rec")]
    Record(RecordArgs),

    /// Control streaming
    #[command(visible_alias = "st")]
    Stream(StreamArgs),

    /// Manage scene collections
    #[command(visible_aliases = ["scn", "scenecollection"])]
    SceneCollection(SceneCollectionArgs),

    /// Manage profiles
    #[command(visible_alias = "p")]
    Profile(ProfileArgs),

    /// Control the replay buffer
    #[command(visible_aliases = ["rb", "replaybuffer"])]
    ReplayBuffer(ReplayBufferArgs),

    /// Control studio mode
    #[command(visible_aliases = ["sm", "studiomode"])]
    StudioMode(StudioModeArgs),

    /// Control the virtual camera
    #[command(visible_aliases = ["vc", "virtualcam"])]
    VirtualCam(VirtualCamArgs),

    /// List and trigger hotkeys
    #[command(visible_alias = "hk")]
    Hotkey(HotkeyArgs),

    /// Manage source filters
    #[command(visible_alias = "f")]
    Filter(FilterArgs),

    /// Open projectors
    #[command(visible_alias = "prj")]
    Projector(ProjectorArgs),

    /// Take source screenshots
    #[command(visible_alias = "ss")]
    Screenshot(ScreenshotArgs),

    /// Show or change video, stream service and profile settings
    #[command(visible_alias = "set")]
    Settings(SettingsArgs),

    /// Control media inputs
    #[command(visible_alias = "mi")]
    Media(MediaArgs),
}

fn main() -> Result<()> {
    config::load_env_files()?;
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let command = match cli.command {
        Commands::Completion(args) => {
            let stdout = std::io::stdout();
            return cmd::completion::execute_completion(args, &mut stdout.lock());
        }
        other => other,
    };

    let style = cli.style.to_style(config::no_color_env());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let client = obs::connect(&cli.obs).await?;
        crate::log_info!("connected to {}:{}", cli.obs.host, cli.obs.port);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let result = cmd::run_session(client, command, &mut out, &style).await;
        out.flush().context("failed to flush output")?;
        result
    })
}
