//! Typed requests, one accessor per obs-websocket resource area.
//!
//! Accessors borrow the client mutably and are consumed by the call:
//! `client.scenes().list().await?`.

use serde_json::{Value, json};

use super::types::*;
use super::{Client, ObsError, Transport};

type Res<T> = Result<T, ObsError>;

macro_rules! accessor {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub struct $name<'a, T> {
                pub(super) client: &'a mut Client<T>,
            }
        )+
    };
}

accessor!(
    /// Version and hotkeys.
    General,
    /// Profiles, scene collections, video, stream service, record directory.
    Config,
    Scenes,
    Inputs,
    Filters,
    SceneItems,
    /// Replay buffer and virtual camera.
    Outputs,
    Record,
    Stream,
    MediaInputs,
    /// Studio mode, monitors, projectors.
    Ui,
    Sources,
);

/* ---- general ---- */

/// Modifier keys for `TriggerHotkeyByKeySequence`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub command: bool,
}

impl<T: Transport> General<'_, T> {
    pub async fn version(self) -> Res<Version> {
        self.client.call("GetVersion", None).await
    }

    pub async fn hotkeys(self) -> Res<Vec<String>> {
        self.client.call_field("GetHotkeyList", None, "hotkeys").await
    }

    pub async fn trigger_hotkey(self, name: &str) -> Res<()> {
        self.client
            .send("TriggerHotkeyByName", Some(json!({ "hotkeyName": name })))
            .await
    }

    pub async fn trigger_key_sequence(self, key_id: &str, mods: KeyModifiers) -> Res<()> {
        let data = json!({
            "keyId": key_id,
            "keyModifiers": {
                "shift": mods.shift,
                "control": mods.control,
                "alt": mods.alt,
                "command": mods.command,
            }
        });
        self.client
            .send("TriggerHotkeyByKeySequence", Some(data))
            .await
    }
}

/* ---- config ---- */

impl<T: Transport> Config<'_, T> {
    pub async fn profiles(self) -> Res<ProfileList> {
        self.client.call("GetProfileList", None).await
    }

    pub async fn set_current_profile(self, name: &str) -> Res<()> {
        self.client
            .send("SetCurrentProfile", Some(json!({ "profileName": name })))
            .await
    }

    pub async fn create_profile(self, name: &str) -> Res<()> {
        self.client
            .send("CreateProfile", Some(json!({ "profileName": name })))
            .await
    }

    pub async fn remove_profile(self, name: &str) -> Res<()> {
        self.client
            .send("RemoveProfile", Some(json!({ "profileName": name })))
            .await
    }

    pub async fn scene_collections(self) -> Res<SceneCollectionList> {
        self.client.call("GetSceneCollectionList", None).await
    }

    pub async fn set_current_scene_collection(self, name: &str) -> Res<()> {
        self.client
            .send(
                "SetCurrentSceneCollection",
                Some(json!({ "sceneCollectionName": name })),
            )
            .await
    }

    pub async fn create_scene_collection(self, name: &str) -> Res<()> {
        self.client
            .send(
                "CreateSceneCollection",
                Some(json!({ "sceneCollectionName": name })),
            )
            .await
    }

    pub async fn profile_parameter(self, category: &str, name: &str) -> Res<ProfileParameter> {
        self.client
            .call(
                "GetProfileParameter",
                Some(json!({ "parameterCategory": category, "parameterName": name })),
            )
            .await
    }

    pub async fn set_profile_parameter(self, category: &str, name: &str, value: &str) -> Res<()> {
        self.client
            .send(
                "SetProfileParameter",
                Some(json!({
                    "parameterCategory": category,
                    "parameterName": name,
                    "parameterValue": value,
                })),
            )
            .await
    }

    pub async fn video_settings(self) -> Res<VideoSettings> {
        self.client.call("GetVideoSettings", None).await
    }

    pub async fn set_video_settings(self, settings: &VideoSettings) -> Res<()> {
        let data = serde_json::to_value(settings)?;
        self.client.send("SetVideoSettings", Some(data)).await
    }

    pub async fn stream_service_settings(self) -> Res<StreamServiceSettings> {
        self.client.call("GetStreamServiceSettings", None).await
    }

    pub async fn set_stream_service_settings(self, kind: &str, settings: Settings) -> Res<()> {
        self.client
            .send(
                "SetStreamServiceSettings",
                Some(json!({
                    "streamServiceType": kind,
                    "streamServiceSettings": settings,
                })),
            )
            .await
    }

    pub async fn record_directory(self) -> Res<String> {
        self.client
            .call_field("GetRecordDirectory", None, "recordDirectory")
            .await
    }

    pub async fn set_record_directory(self, dir: &str) -> Res<()> {
        self.client
            .send("SetRecordDirectory", Some(json!({ "recordDirectory": dir })))
            .await
    }
}

/* ---- scenes ---- */

impl<T: Transport> Scenes<'_, T> {
    pub async fn list(self) -> Res<SceneList> {
        self.client.call("GetSceneList", None).await
    }

    pub async fn current_program(self) -> Res<String> {
        let scene: CurrentScene = self.client.call("GetCurrentProgramScene", None).await?;
        Ok(scene.into_name())
    }

    pub async fn current_preview(self) -> Res<String> {
        let scene: CurrentScene = self.client.call("GetCurrentPreviewScene", None).await?;
        Ok(scene.into_name())
    }

    pub async fn set_current_program(self, name: &str) -> Res<()> {
        self.client
            .send("SetCurrentProgramScene", Some(json!({ "sceneName": name })))
            .await
    }

    pub async fn set_current_preview(self, name: &str) -> Res<()> {
        self.client
            .send("SetCurrentPreviewScene", Some(json!({ "sceneName": name })))
            .await
    }

    pub async fn create(self, name: &str) -> Res<()> {
        self.client
            .send("CreateScene", Some(json!({ "sceneName": name })))
            .await
    }

    pub async fn remove(self, name: &str) -> Res<()> {
        self.client
            .send("RemoveScene", Some(json!({ "sceneName": name })))
            .await
    }
}

/* ---- inputs ---- */

impl<T: Transport> Inputs<'_, T> {
    pub async fn list(self) -> Res<Vec<Input>> {
        self.client.call_field("GetInputList", None, "inputs").await
    }

    pub async fn kinds(self) -> Res<Vec<String>> {
        self.client
            .call_field(
                "GetInputKindList",
                Some(json!({ "unversioned": false })),
                "inputKinds",
            )
            .await
    }

    /// Create `name` of `kind` inside `scene`; returns the new scene item id.
    pub async fn create(self, scene: &str, name: &str, kind: &str) -> Res<i64> {
        self.client
            .call_field(
                "CreateInput",
                Some(json!({
                    "sceneName": scene,
                    "inputName": name,
                    "inputKind": kind,
                    "sceneItemEnabled": true,
                })),
                "sceneItemId",
            )
            .await
    }

    pub async fn remove(self, name: &str) -> Res<()> {
        self.client
            .send("RemoveInput", Some(json!({ "inputName": name })))
            .await
    }

    pub async fn muted(self, name: &str) -> Res<bool> {
        self.client
            .call_field(
                "GetInputMute",
                Some(json!({ "inputName": name })),
                "inputMuted",
            )
            .await
    }

    pub async fn set_muted(self, name: &str, muted: bool) -> Res<()> {
        self.client
            .send(
                "SetInputMute",
                Some(json!({ "inputName": name, "inputMuted": muted })),
            )
            .await
    }

    pub async fn volume(self, name: &str) -> Res<InputVolume> {
        self.client
            .call("GetInputVolume", Some(json!({ "inputName": name })))
            .await
    }

    pub async fn set_volume_db(self, name: &str, db: f64) -> Res<()> {
        self.client
            .send(
                "SetInputVolume",
                Some(json!({ "inputName": name, "inputVolumeDb": db })),
            )
            .await
    }

    pub async fn settings(self, name: &str) -> Res<InputSettings> {
        self.client
            .call("GetInputSettings", Some(json!({ "inputName": name })))
            .await
    }

    /// Write `settings`. With `overlay: false` OBS replaces the whole map, so
    /// callers pass the complete merged map.
    pub async fn set_settings(self, name: &str, settings: Settings, overlay: bool) -> Res<()> {
        self.client
            .send(
                "SetInputSettings",
                Some(json!({
                    "inputName": name,
                    "inputSettings": settings,
                    "overlay": overlay,
                })),
            )
            .await
    }

    pub async fn property_items(self, name: &str, property: &str) -> Res<Vec<PropertyItem>> {
        self.client
            .call_field(
                "GetInputPropertiesListPropertyItems",
                Some(json!({ "inputName": name, "propertyName": property })),
                "propertyItems",
            )
            .await
    }
}

/* ---- filters ---- */

impl<T: Transport> Filters<'_, T> {
    pub async fn list(self, source: &str) -> Res<Vec<Filter>> {
        self.client
            .call_field(
                "GetSourceFilterList",
                Some(json!({ "sourceName": source })),
                "filters",
            )
            .await
    }

    pub async fn get(self, source: &str, filter: &str) -> Res<Filter> {
        let mut found: Filter = self
            .client
            .call(
                "GetSourceFilter",
                Some(json!({ "sourceName": source, "filterName": filter })),
            )
            .await?;
        found.filter_name = filter.to_string();
        Ok(found)
    }

    pub async fn default_settings(self, kind: &str) -> Res<Settings> {
        self.client
            .call_field(
                "GetSourceFilterDefaultSettings",
                Some(json!({ "filterKind": kind })),
                "defaultFilterSettings",
            )
            .await
    }

    pub async fn set_enabled(self, source: &str, filter: &str, enabled: bool) -> Res<()> {
        self.client
            .send(
                "SetSourceFilterEnabled",
                Some(json!({
                    "sourceName": source,
                    "filterName": filter,
                    "filterEnabled": enabled,
                })),
            )
            .await
    }
}

/* ---- scene items ---- */

impl<T: Transport> SceneItems<'_, T> {
    pub async fn list(self, scene: &str) -> Res<Vec<SceneItem>> {
        self.client
            .call_field(
                "GetSceneItemList",
                Some(json!({ "sceneName": scene })),
                "sceneItems",
            )
            .await
    }

    pub async fn group_list(self, group: &str) -> Res<Vec<SceneItem>> {
        self.client
            .call_field(
                "GetGroupSceneItemList",
                Some(json!({ "sceneName": group })),
                "sceneItems",
            )
            .await
    }

    pub async fn enabled(self, scene: &str, id: i64) -> Res<bool> {
        self.client
            .call_field(
                "GetSceneItemEnabled",
                Some(json!({ "sceneName": scene, "sceneItemId": id })),
                "sceneItemEnabled",
            )
            .await
    }

    pub async fn set_enabled(self, scene: &str, id: i64, enabled: bool) -> Res<()> {
        self.client
            .send(
                "SetSceneItemEnabled",
                Some(json!({
                    "sceneName": scene,
                    "sceneItemId": id,
                    "sceneItemEnabled": enabled,
                })),
            )
            .await
    }

    pub async fn transform(self, scene: &str, id: i64) -> Res<SceneItemTransform> {
        self.client
            .call_field(
                "GetSceneItemTransform",
                Some(json!({ "sceneName": scene, "sceneItemId": id })),
                "sceneItemTransform",
            )
            .await
    }

    pub async fn set_transform(self, scene: &str, id: i64, t: &SceneItemTransform) -> Res<()> {
        self.client
            .send(
                "SetSceneItemTransform",
                Some(json!({
                    "sceneName": scene,
                    "sceneItemId": id,
                    "sceneItemTransform": serde_json::to_value(t)?,
                })),
            )
            .await
    }
}

/* ---- outputs ---- */

impl<T: Transport> Outputs<'_, T> {
    pub async fn replay_buffer_status(self) -> Res<OutputStatus> {
        self.client.call("GetReplayBufferStatus", None).await
    }
    pub async fn start_replay_buffer(self) -> Res<()> {
        self.client.send("StartReplayBuffer", None).await
    }
    pub async fn stop_replay_buffer(self) -> Res<()> {
        self.client.send("StopReplayBuffer", None).await
    }
    pub async fn toggle_replay_buffer(self) -> Res<bool> {
        self.client
            .call_field("ToggleReplayBuffer", None, "outputActive")
            .await
    }
    pub async fn save_replay_buffer(self) -> Res<()> {
        self.client.send("SaveReplayBuffer", None).await
    }

    pub async fn virtual_cam_status(self) -> Res<OutputStatus> {
        self.client.call("GetVirtualCamStatus", None).await
    }
    pub async fn start_virtual_cam(self) -> Res<()> {
        self.client.send("StartVirtualCam", None).await
    }
    pub async fn stop_virtual_cam(self) -> Res<()> {
        self.client.send("StopVirtualCam", None).await
    }
    pub async fn toggle_virtual_cam(self) -> Res<bool> {
        self.client
            .call_field("ToggleVirtualCam", None, "outputActive")
            .await
    }
}

/* ---- record ---- */

impl<T: Transport> Record<'_, T> {
    pub async fn status(self) -> Res<OutputStatus> {
        self.client.call("GetRecordStatus", None).await
    }
    pub async fn start(self) -> Res<()> {
        self.client.send("StartRecord", None).await
    }
    /// Stop and return the path of the written file.
    pub async fn stop(self) -> Res<String> {
        self.client.call_field("StopRecord", None, "outputPath").await
    }
    pub async fn toggle(self) -> Res<bool> {
        self.client.call_field("ToggleRecord", None, "outputActive").await
    }
    pub async fn pause(self) -> Res<()> {
        self.client.send("PauseRecord", None).await
    }
    pub async fn resume(self) -> Res<()> {
        self.client.send("ResumeRecord", None).await
    }
    pub async fn split(self) -> Res<()> {
        self.client.send("SplitRecordFile", None).await
    }
    pub async fn chapter(self, name: Option<&str>) -> Res<()> {
        let data = name.map(|n| json!({ "chapterName": n }));
        self.client.send("CreateRecordChapter", data).await
    }
}

/* ---- stream ---- */

impl<T: Transport> Stream<'_, T> {
    pub async fn status(self) -> Res<OutputStatus> {
        self.client.call("GetStreamStatus", None).await
    }
    pub async fn start(self) -> Res<()> {
        self.client.send("StartStream", None).await
    }
    pub async fn stop(self) -> Res<()> {
        self.client.send("StopStream", None).await
    }
    pub async fn toggle(self) -> Res<bool> {
        self.client.call_field("ToggleStream", None, "outputActive").await
    }
}

/* ---- media inputs ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    Play,
    Pause,
    Stop,
    Restart,
}

impl MediaAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaAction::Play => "OBS_WEBSOCKET_MEDIA_INPUT_ACTION_PLAY",
            MediaAction::Pause => "OBS_WEBSOCKET_MEDIA_INPUT_ACTION_PAUSE",
            MediaAction::Stop => "OBS_WEBSOCKET_MEDIA_INPUT_ACTION_STOP",
            MediaAction::Restart => "OBS_WEBSOCKET_MEDIA_INPUT_ACTION_RESTART",
        }
    }
}

impl<T: Transport> MediaInputs<'_, T> {
    pub async fn status(self, input: &str) -> Res<MediaInputStatus> {
        self.client
            .call("GetMediaInputStatus", Some(json!({ "inputName": input })))
            .await
    }

    pub async fn set_cursor(self, input: &str, millis: u64) -> Res<()> {
        self.client
            .send(
                "SetMediaInputCursor",
                Some(json!({ "inputName": input, "mediaCursor": millis })),
            )
            .await
    }

    pub async fn trigger(self, input: &str, action: MediaAction) -> Res<()> {
        self.client
            .send(
                "TriggerMediaInputAction",
                Some(json!({ "inputName": input, "mediaAction": action.as_str() })),
            )
            .await
    }
}

/* ---- ui ---- */

impl<T: Transport> Ui<'_, T> {
    pub async fn studio_mode_enabled(self) -> Res<bool> {
        self.client
            .call_field("GetStudioModeEnabled", None, "studioModeEnabled")
            .await
    }

    pub async fn set_studio_mode_enabled(self, enabled: bool) -> Res<()> {
        self.client
            .send(
                "SetStudioModeEnabled",
                Some(json!({ "studioModeEnabled": enabled })),
            )
            .await
    }

    pub async fn monitors(self) -> Res<Vec<Monitor>> {
        self.client.call_field("GetMonitorList", None, "monitors").await
    }

    pub async fn open_source_projector(self, source: &str, monitor_index: i64) -> Res<()> {
        self.client
            .send(
                "OpenSourceProjector",
                Some(json!({ "sourceName": source, "monitorIndex": monitor_index })),
            )
            .await
    }
}

/* ---- sources ---- */

#[derive(Debug, Clone)]
pub struct Screenshot<'s> {
    pub source: &'s str,
    pub format: &'s str,
    pub path: &'s str,
    pub width: f64,
    pub height: f64,
    pub quality: f64,
}

impl<T: Transport> Sources<'_, T> {
    pub async fn save_screenshot(self, shot: &Screenshot<'_>) -> Res<()> {
        let data: Value = json!({
            "sourceName": shot.source,
            "imageFormat": shot.format,
            "imageFilePath": shot.path,
            "imageWidth": shot.width,
            "imageHeight": shot.height,
            "imageCompressionQuality": shot.quality,
        });
        self.client.send("SaveSourceScreenshot", Some(data)).await
    }
}
