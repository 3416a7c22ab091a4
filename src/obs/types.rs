//! Response payloads. Field names follow obs-websocket (camelCase on the wire).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Settings = Map<String, Value>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub obs_version: String,
    pub obs_web_socket_version: String,
}

/* ---- scenes ---- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub scene_name: String,
    #[serde(default)]
    pub scene_uuid: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneList {
    pub scenes: Vec<Scene>,
}

/// Current program/preview scene. Newer servers send `sceneName`, older ones
/// only the `currentProgramSceneName`/`currentPreviewSceneName` spelling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentScene {
    #[serde(default)]
    pub scene_name: Option<String>,
    #[serde(default)]
    pub current_program_scene_name: Option<String>,
    #[serde(default)]
    pub current_preview_scene_name: Option<String>,
}

impl CurrentScene {
    pub fn into_name(self) -> String {
        self.scene_name
            .or(self.current_program_scene_name)
            .or(self.current_preview_scene_name)
            .unwrap_or_default()
    }
}

/* ---- inputs ---- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub input_name: String,
    pub input_kind: String,
    #[serde(default)]
    pub input_uuid: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSettings {
    pub input_kind: String,
    #[serde(default)]
    pub input_settings: Settings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputVolume {
    pub input_volume_db: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyItem {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub item_value: Value,
}

/* ---- filters ---- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub filter_name: String,
    pub filter_kind: String,
    pub filter_enabled: bool,
    #[serde(default)]
    pub filter_settings: Settings,
}

/* ---- scene items ---- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItem {
    pub scene_item_id: i64,
    pub source_name: String,
    #[serde(default)]
    pub source_uuid: String,
    pub scene_item_enabled: bool,
    #[serde(default)]
    pub is_group: Option<bool>,
}

impl SceneItem {
    pub fn is_group(&self) -> bool {
        self.is_group.unwrap_or(false)
    }
}

/// Full item transform. Unknown keys (source size, computed width/height)
/// are carried through untouched so a read-modify-write keeps them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneItemTransform {
    pub alignment: f64,
    pub bounds_alignment: f64,
    pub bounds_height: f64,
    pub bounds_type: String,
    pub bounds_width: f64,
    pub crop_to_bounds: bool,
    pub crop_bottom: f64,
    pub crop_left: f64,
    pub crop_right: f64,
    pub crop_top: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    #[serde(flatten)]
    pub extra: Settings,
}

/* ---- outputs ---- */

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputStatus {
    pub output_active: bool,
    #[serde(default)]
    pub output_paused: bool,
    #[serde(default)]
    pub output_duration: f64,
}

/* ---- config ---- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileList {
    pub current_profile_name: String,
    pub profiles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneCollectionList {
    pub current_scene_collection_name: String,
    pub scene_collections: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileParameter {
    #[serde(default)]
    pub parameter_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    pub fps_numerator: u32,
    pub fps_denominator: u32,
    pub base_width: u32,
    pub base_height: u32,
    pub output_width: u32,
    pub output_height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamServiceSettings {
    pub stream_service_type: String,
    #[serde(default)]
    pub stream_service_settings: Settings,
}

impl StreamServiceSettings {
    pub fn field(&self, key: &str) -> String {
        self.stream_service_settings
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/* ---- ui / media ---- */

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub monitor_index: i64,
    pub monitor_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInputStatus {
    #[serde(default)]
    pub media_cursor: Option<f64>,
}
