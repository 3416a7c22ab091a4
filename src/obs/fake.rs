//! In-memory OBS used by tests.
//!
//! `FakeObs` implements [`Transport`] by interpreting request types against a
//! small state model. Clones share state, so a test keeps one handle for
//! inspection while the client owns another. Every request is recorded with
//! its payload; failures use the same status codes OBS would send.

use serde_json::{Map, Value, json};
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::types::{SceneItemTransform, Settings, VideoSettings};
use super::{Client, ObsError, Transport};

/// Status codes the fake answers with, as obs-websocket defines them.
mod status {
    pub use crate::obs::status::INVALID_RESOURCE_STATE;

    pub const MISSING_REQUEST_FIELD: u16 = 300;
    pub const OUTPUT_RUNNING: u16 = 500;
    pub const OUTPUT_NOT_RUNNING: u16 = 501;
    pub const RESOURCE_NOT_FOUND: u16 = 600;
    pub const RESOURCE_ALREADY_EXISTS: u16 = 601;
}

const UNKNOWN_REQUEST_TYPE: u16 = 204;
const STUDIO_MODE_NOT_ACTIVE: u16 = 506;

#[derive(Debug, Clone)]
pub struct FakeItem {
    pub id: i64,
    pub source: String,
    pub enabled: bool,
    pub is_group: bool,
    pub transform: SceneItemTransform,
}

#[derive(Debug, Clone)]
pub struct FakeInput {
    pub name: String,
    pub kind: String,
    pub uuid: String,
    /// `None` for inputs without audio.
    pub muted: Option<bool>,
    pub volume_db: f64,
    pub settings: Settings,
    pub properties: BTreeMap<String, Vec<(String, Value)>>,
    pub media_cursor: f64,
    pub media_action: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeFilter {
    pub name: String,
    pub kind: String,
    pub enabled: bool,
    pub settings: Settings,
}

#[derive(Debug)]
pub struct FakeState {
    /// Scenes in display order (top first).
    pub scenes: Vec<(String, Vec<FakeItem>)>,
    pub groups: BTreeMap<String, Vec<FakeItem>>,
    pub program: String,
    pub preview: String,
    pub studio_mode: bool,
    pub inputs: Vec<FakeInput>,
    pub filters: BTreeMap<String, Vec<FakeFilter>>,
    pub filter_defaults: BTreeMap<String, Settings>,
    pub profiles: Vec<String>,
    pub current_profile: String,
    pub collections: Vec<String>,
    pub current_collection: String,
    pub profile_params: BTreeMap<(String, String), String>,
    pub record_active: bool,
    pub record_paused: bool,
    pub record_dir: String,
    pub chapters: Vec<Option<String>>,
    pub stream_active: bool,
    pub stream_duration: f64,
    pub replay_active: bool,
    pub replay_saves: usize,
    pub vcam_active: bool,
    pub hotkeys: Vec<String>,
    pub triggered: Vec<String>,
    pub monitors: Vec<(i64, String)>,
    pub projectors: Vec<(String, i64)>,
    pub screenshots: Vec<Value>,
    pub video: VideoSettings,
    pub stream_type: String,
    pub stream_settings: Settings,
    pub calls: Vec<(String, Value)>,
    pub closes: usize,
    pub fail_close: bool,
    next_id: i64,
}

impl Default for FakeState {
    fn default() -> Self {
        let mut stream_settings = Map::new();
        stream_settings.insert("server".into(), json!("rtmp://localhost/live"));
        stream_settings.insert("key".into(), json!("live_123"));
        stream_settings.insert("use_auth".into(), json!(false));

        let mut profile_params = BTreeMap::new();
        profile_params.insert(("Output".into(), "Mode".into()), "Simple".into());
        profile_params.insert(("SimpleOutput".into(), "RecFormat2".into()), "mkv".into());

        Self {
            scenes: vec![("Scene".into(), Vec::new())],
            groups: BTreeMap::new(),
            program: "Scene".into(),
            preview: "Scene".into(),
            studio_mode: false,
            inputs: Vec::new(),
            filters: BTreeMap::new(),
            filter_defaults: BTreeMap::new(),
            profiles: vec!["Untitled".into()],
            current_profile: "Untitled".into(),
            collections: vec!["Untitled".into()],
            current_collection: "Untitled".into(),
            profile_params,
            record_active: false,
            record_paused: false,
            record_dir: "/home/obs/Videos".into(),
            chapters: Vec::new(),
            stream_active: false,
            stream_duration: 0.0,
            replay_active: false,
            replay_saves: 0,
            vcam_active: false,
            hotkeys: vec![
                "OBSBasic.StartRecording".into(),
                "OBSBasic.StopRecording".into(),
            ],
            triggered: Vec::new(),
            monitors: vec![(0, "Built-in Display(0)".into())],
            projectors: Vec::new(),
            screenshots: Vec::new(),
            video: VideoSettings {
                fps_numerator: 60,
                fps_denominator: 1,
                base_width: 1920,
                base_height: 1080,
                output_width: 1280,
                output_height: 720,
            },
            stream_type: "rtmp_custom".into(),
            stream_settings,
            calls: Vec::new(),
            closes: 0,
            fail_close: false,
            next_id: 1,
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeObs {
    state: Rc<RefCell<FakeState>>,
}

/* ---- Builders ---- */

impl FakeObs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> Client<FakeObs> {
        Client::new(self.clone())
    }

    pub fn scene(self, name: &str) -> Self {
        self.state
            .borrow_mut()
            .scenes
            .push((name.to_string(), Vec::new()));
        self
    }

    pub fn program(self, name: &str) -> Self {
        self.state.borrow_mut().program = name.to_string();
        self
    }

    /// Input without audio.
    pub fn input(self, scene: &str, name: &str, kind: &str) -> Self {
        self.add_input(scene, name, kind, None);
        self
    }

    pub fn audio_input(self, scene: &str, name: &str, kind: &str, muted: bool) -> Self {
        self.add_input(scene, name, kind, Some(muted));
        self
    }

    /// Group `name` in `scene`, holding one colour source per child.
    pub fn group(self, scene: &str, name: &str, children: &[&str]) -> Self {
        {
            let mut st = self.state.borrow_mut();
            let mut items = Vec::new();
            for child in children {
                let id = st.bump();
                st.inputs.push(new_input(child, "color_source_v3", None, id));
                items.push(new_item(id, child, false));
            }
            st.groups.insert(name.to_string(), items);
            let id = st.bump();
            if let Some(list) = st.scene_items_mut(scene) {
                list.push(new_item(id, name, true));
            }
        }
        self
    }

    pub fn hidden(self, scene: &str, source: &str) -> Self {
        if let Some(item) = self.state.borrow_mut().find_item_mut(scene, source) {
            item.enabled = false;
        }
        self
    }

    pub fn settings(self, input: &str, settings: Value) -> Self {
        if let (Some(found), Value::Object(map)) =
            (self.state.borrow_mut().input_mut(input), settings)
        {
            found.settings = map;
        }
        self
    }

    pub fn property(self, input: &str, property: &str, items: &[(&str, Value)]) -> Self {
        if let Some(found) = self.state.borrow_mut().input_mut(input) {
            found.properties.insert(
                property.to_string(),
                items
                    .iter()
                    .map(|(n, v)| (n.to_string(), v.clone()))
                    .collect(),
            );
        }
        self
    }

    pub fn filter(self, source: &str, name: &str, kind: &str, enabled: bool, settings: Value) -> Self {
        let settings = match settings {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.state
            .borrow_mut()
            .filters
            .entry(source.to_string())
            .or_default()
            .push(FakeFilter {
                name: name.to_string(),
                kind: kind.to_string(),
                enabled,
                settings,
            });
        self
    }

    pub fn filter_defaults(self, kind: &str, defaults: Value) -> Self {
        if let Value::Object(map) = defaults {
            self.state
                .borrow_mut()
                .filter_defaults
                .insert(kind.to_string(), map);
        }
        self
    }

    pub fn profile(self, name: &str) -> Self {
        self.state.borrow_mut().profiles.push(name.to_string());
        self
    }

    pub fn collection(self, name: &str) -> Self {
        self.state.borrow_mut().collections.push(name.to_string());
        self
    }

    pub fn studio_mode(self, enabled: bool) -> Self {
        self.state.borrow_mut().studio_mode = enabled;
        self
    }

    pub fn recording(self, active: bool, paused: bool) -> Self {
        {
            let mut st = self.state.borrow_mut();
            st.record_active = active;
            st.record_paused = paused;
        }
        self
    }

    pub fn streaming(self, active: bool, duration_ms: f64) -> Self {
        {
            let mut st = self.state.borrow_mut();
            st.stream_active = active;
            st.stream_duration = duration_ms;
        }
        self
    }

    pub fn failing_close(self) -> Self {
        self.state.borrow_mut().fail_close = true;
        self
    }

    fn add_input(&self, scene: &str, name: &str, kind: &str, muted: Option<bool>) {
        let mut st = self.state.borrow_mut();
        let id = st.bump();
        st.inputs.push(new_input(name, kind, muted, id));
        if let Some(list) = st.scene_items_mut(scene) {
            list.push(new_item(id, name, false));
        }
    }
}

/* ---- Inspection ---- */

const MUTATING_PREFIXES: &[&str] = &[
    "Set", "Create", "Remove", "Start", "Stop", "Toggle", "Pause", "Resume", "Save", "Split",
    "Trigger", "Open",
];

impl FakeObs {
    pub fn state(&self) -> Ref<'_, FakeState> {
        self.state.borrow()
    }

    /// Request types in the order they were issued.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|r| MUTATING_PREFIXES.iter().any(|p| r.starts_with(p)))
            .collect()
    }

    /// Payload of the last request of `request_type`.
    pub fn last_payload(&self, request_type: &str) -> Option<Value> {
        self.state
            .borrow()
            .calls
            .iter()
            .rev()
            .find(|(r, _)| r == request_type)
            .map(|(_, d)| d.clone())
    }

    pub fn closes(&self) -> usize {
        self.state.borrow().closes
    }

    pub fn item_enabled(&self, scene: &str, source: &str) -> Option<bool> {
        self.state
            .borrow_mut()
            .find_item_mut(scene, source)
            .map(|i| i.enabled)
    }

    pub fn input_state(&self, name: &str) -> Option<FakeInput> {
        self.state.borrow_mut().input_mut(name).cloned()
    }
}

/* ---- Transport ---- */

impl Transport for FakeObs {
    async fn request(&mut self, request_type: &str, data: Option<Value>) -> Result<Value, ObsError> {
        let mut st = self.state.borrow_mut();
        let d = data.unwrap_or(Value::Null);
        st.calls.push((request_type.to_string(), d.clone()));
        st.handle(request_type, &d)
    }

    async fn close(&mut self) -> Result<(), ObsError> {
        let mut st = self.state.borrow_mut();
        st.closes += 1;
        if st.fail_close {
            return Err(ObsError::Protocol("close failed".into()));
        }
        Ok(())
    }
}

fn new_input(name: &str, kind: &str, muted: Option<bool>, id: i64) -> FakeInput {
    FakeInput {
        name: name.to_string(),
        kind: kind.to_string(),
        uuid: format!("uuid-{id}"),
        muted,
        volume_db: 0.0,
        settings: Map::new(),
        properties: BTreeMap::new(),
        media_cursor: 0.0,
        media_action: None,
    }
}

fn new_item(id: i64, source: &str, is_group: bool) -> FakeItem {
    FakeItem {
        id,
        source: source.to_string(),
        enabled: true,
        is_group,
        transform: SceneItemTransform {
            bounds_type: "OBS_BOUNDS_NONE".into(),
            bounds_width: 1.0,
            bounds_height: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alignment: 5.0,
            ..Default::default()
        },
    }
}

fn fail(request: &str, code: u16, comment: impl Into<String>) -> ObsError {
    ObsError::Request {
        request: request.to_string(),
        code,
        comment: comment.into(),
    }
}

fn s(d: &Value, key: &str) -> String {
    d.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn b(d: &Value, key: &str) -> bool {
    d.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn n(d: &Value, key: &str) -> f64 {
    d.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn item_json(item: &FakeItem, uuid: &str) -> Value {
    let is_group = if item.is_group { Value::Bool(true) } else { Value::Null };
    json!({
        "sceneItemId": item.id,
        "sourceName": item.source,
        "sourceUuid": uuid,
        "sceneItemEnabled": item.enabled,
        "isGroup": is_group,
    })
}

impl FakeState {
    fn bump(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn has_scene(&self, name: &str) -> bool {
        self.scenes.iter().any(|(s, _)| s == name)
    }

    fn scene_items_mut(&mut self, name: &str) -> Option<&mut Vec<FakeItem>> {
        if let Some((_, items)) = self.scenes.iter_mut().find(|(s, _)| s == name) {
            return Some(items);
        }
        self.groups.get_mut(name)
    }

    fn find_item_mut(&mut self, scene: &str, source: &str) -> Option<&mut FakeItem> {
        self.scene_items_mut(scene)?
            .iter_mut()
            .find(|i| i.source == source)
    }

    fn input_mut(&mut self, name: &str) -> Option<&mut FakeInput> {
        self.inputs.iter_mut().find(|i| i.name == name)
    }

    fn uuid_of(&self, source: &str) -> String {
        self.inputs
            .iter()
            .find(|i| i.name == source)
            .map(|i| i.uuid.clone())
            .unwrap_or_else(|| format!("uuid-{source}"))
    }

    fn source_exists(&self, name: &str) -> bool {
        self.has_scene(name) || self.groups.contains_key(name) || self.inputs.iter().any(|i| i.name == name)
    }

    fn list_items(&mut self, req: &str, scene: &str) -> Result<Value, ObsError> {
        let items = self
            .scene_items_mut(scene)
            .cloned()
            .ok_or_else(|| fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{scene}`.")))?;
        let list: Vec<Value> = items
            .iter()
            .map(|i| item_json(i, &self.uuid_of(&i.source)))
            .collect();
        Ok(json!({ "sceneItems": list }))
    }

    fn item_by_id(&mut self, req: &str, d: &Value) -> Result<&mut FakeItem, ObsError> {
        let scene = s(d, "sceneName");
        let id = d.get("sceneItemId").and_then(Value::as_i64).unwrap_or(-1);
        self.scene_items_mut(&scene)
            .ok_or_else(|| fail(req, status::RESOURCE_NOT_FOUND, "scene not found"))?
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| fail(req, status::RESOURCE_NOT_FOUND, "scene item not found"))
    }

    fn input_or_fail(&mut self, req: &str, d: &Value) -> Result<&mut FakeInput, ObsError> {
        let name = s(d, "inputName");
        self.input_mut(&name)
            .ok_or_else(|| fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{name}`.")))
    }

    fn filter_or_fail(&mut self, req: &str, d: &Value) -> Result<&mut FakeFilter, ObsError> {
        let source = s(d, "sourceName");
        let name = s(d, "filterName");
        self.filters
            .get_mut(&source)
            .and_then(|f| f.iter_mut().find(|f| f.name == name))
            .ok_or_else(|| fail(req, status::RESOURCE_NOT_FOUND, "No filter was found"))
    }

    fn output_toggle(req: &str, active: &mut bool, want: Option<bool>) -> Result<Value, ObsError> {
        match want {
            Some(true) if *active => Err(fail(req, status::OUTPUT_RUNNING, "output is already running")),
            Some(false) if !*active => Err(fail(req, status::OUTPUT_NOT_RUNNING, "output is not running")),
            Some(v) => {
                *active = v;
                Ok(Value::Null)
            }
            None => {
                *active = !*active;
                Ok(json!({ "outputActive": *active }))
            }
        }
    }

    fn handle(&mut self, req: &str, d: &Value) -> Result<Value, ObsError> {
        match req {
            /* general */
            "GetVersion" => Ok(json!({
                "obsVersion": "30.2.3",
                "obsWebSocketVersion": "5.5.2",
                "rpcVersion": 1,
                "platformDescription": "fake"
            })),
            "GetHotkeyList" => Ok(json!({ "hotkeys": self.hotkeys })),
            "TriggerHotkeyByName" => {
                let name = s(d, "hotkeyName");
                if !self.hotkeys.contains(&name) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, "No hotkeys were found by that name."));
                }
                self.triggered.push(name);
                Ok(Value::Null)
            }
            "TriggerHotkeyByKeySequence" => {
                self.triggered.push(s(d, "keyId"));
                Ok(Value::Null)
            }

            /* config */
            "GetProfileList" => Ok(json!({
                "currentProfileName": self.current_profile,
                "profiles": self.profiles,
            })),
            "SetCurrentProfile" => {
                let name = s(d, "profileName");
                if !self.profiles.contains(&name) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, "No profile found by that name."));
                }
                self.current_profile = name;
                Ok(Value::Null)
            }
            "CreateProfile" => {
                let name = s(d, "profileName");
                if self.profiles.contains(&name) {
                    return Err(fail(req, status::RESOURCE_ALREADY_EXISTS, "A profile already exists by that name."));
                }
                self.profiles.push(name.clone());
                self.current_profile = name;
                Ok(Value::Null)
            }
            "RemoveProfile" => {
                let name = s(d, "profileName");
                let before = self.profiles.len();
                self.profiles.retain(|p| p != &name);
                if self.profiles.len() == before {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, "No profile found by that name."));
                }
                Ok(Value::Null)
            }
            "GetSceneCollectionList" => Ok(json!({
                "currentSceneCollectionName": self.current_collection,
                "sceneCollections": self.collections,
            })),
            "SetCurrentSceneCollection" => {
                let name = s(d, "sceneCollectionName");
                if !self.collections.contains(&name) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, "No scene collection found by that name."));
                }
                self.current_collection = name;
                Ok(Value::Null)
            }
            "CreateSceneCollection" => {
                let name = s(d, "sceneCollectionName");
                if self.collections.contains(&name) {
                    return Err(fail(req, status::RESOURCE_ALREADY_EXISTS, "A scene collection already exists by that name."));
                }
                self.collections.push(name.clone());
                self.current_collection = name;
                Ok(Value::Null)
            }
            "GetProfileParameter" => {
                let key = (s(d, "parameterCategory"), s(d, "parameterName"));
                Ok(json!({
                    "parameterValue": self.profile_params.get(&key),
                    "defaultParameterValue": Value::Null,
                }))
            }
            "SetProfileParameter" => {
                let key = (s(d, "parameterCategory"), s(d, "parameterName"));
                self.profile_params.insert(key, s(d, "parameterValue"));
                Ok(Value::Null)
            }
            "GetVideoSettings" => Ok(serde_json::to_value(self.video)?),
            "SetVideoSettings" => {
                self.video = serde_json::from_value(d.clone())?;
                Ok(Value::Null)
            }
            "GetStreamServiceSettings" => Ok(json!({
                "streamServiceType": self.stream_type,
                "streamServiceSettings": self.stream_settings,
            })),
            "SetStreamServiceSettings" => {
                self.stream_type = s(d, "streamServiceType");
                if let Some(Value::Object(map)) = d.get("streamServiceSettings") {
                    self.stream_settings = map.clone();
                }
                Ok(Value::Null)
            }
            "GetRecordDirectory" => Ok(json!({ "recordDirectory": self.record_dir })),
            "SetRecordDirectory" => {
                self.record_dir = s(d, "recordDirectory");
                Ok(Value::Null)
            }

            /* scenes */
            "GetSceneList" => {
                let total = self.scenes.len();
                let preview = if self.studio_mode {
                    Value::String(self.preview.clone())
                } else {
                    Value::Null
                };
                let scenes: Vec<Value> = self
                    .scenes
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, (name, _))| json!({
                        "sceneName": name,
                        "sceneUuid": format!("scene-{name}"),
                        "sceneIndex": total - 1 - i,
                    }))
                    .collect();
                Ok(json!({
                    "currentProgramSceneName": self.program,
                    "currentPreviewSceneName": preview,
                    "scenes": scenes,
                }))
            }
            "GetCurrentProgramScene" => Ok(json!({
                "sceneName": self.program,
                "currentProgramSceneName": self.program,
            })),
            "GetCurrentPreviewScene" => {
                if !self.studio_mode {
                    return Err(fail(req, STUDIO_MODE_NOT_ACTIVE, "Studio mode is not active."));
                }
                Ok(json!({ "sceneName": self.preview, "currentPreviewSceneName": self.preview }))
            }
            "SetCurrentProgramScene" => {
                let name = s(d, "sceneName");
                if !self.has_scene(&name) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{name}`.")));
                }
                self.program = name;
                Ok(Value::Null)
            }
            "SetCurrentPreviewScene" => {
                if !self.studio_mode {
                    return Err(fail(req, STUDIO_MODE_NOT_ACTIVE, "Studio mode is not active."));
                }
                let name = s(d, "sceneName");
                if !self.has_scene(&name) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{name}`.")));
                }
                self.preview = name;
                Ok(Value::Null)
            }
            "CreateScene" => {
                let name = s(d, "sceneName");
                if self.source_exists(&name) {
                    return Err(fail(req, status::RESOURCE_ALREADY_EXISTS, "A source already exists by that scene name."));
                }
                self.scenes.push((name, Vec::new()));
                Ok(json!({ "sceneUuid": "scene-new" }))
            }
            "RemoveScene" => {
                let name = s(d, "sceneName");
                if !self.has_scene(&name) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{name}`.")));
                }
                self.scenes.retain(|(s, _)| s != &name);
                if self.program == name {
                    self.program = self.scenes.first().map(|(s, _)| s.clone()).unwrap_or_default();
                }
                Ok(Value::Null)
            }

            /* inputs */
            "GetInputList" => {
                let list: Vec<Value> = self
                    .inputs
                    .iter()
                    .map(|i| json!({
                        "inputName": i.name,
                        "inputKind": i.kind,
                        "inputUuid": i.uuid,
                        "unversionedInputKind": i.kind,
                    }))
                    .collect();
                Ok(json!({ "inputs": list }))
            }
            "GetInputKindList" => Ok(json!({
                "inputKinds": ["color_source_v3", "ffmpeg_source", "text_ft2_source_v2", "wasapi_input_capture"]
            })),
            "CreateInput" => {
                let scene = s(d, "sceneName");
                let name = s(d, "inputName");
                if !self.has_scene(&scene) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{scene}`.")));
                }
                if self.source_exists(&name) {
                    return Err(fail(req, status::RESOURCE_ALREADY_EXISTS, "A source already exists by that input name."));
                }
                let kind = s(d, "inputKind");
                let muted = (kind.contains("audio") || kind.contains("capture")).then_some(false);
                let id = self.bump();
                self.inputs.push(new_input(&name, &kind, muted, id));
                let mut item = new_item(id, &name, false);
                item.enabled = d.get("sceneItemEnabled").and_then(Value::as_bool).unwrap_or(true);
                if let Some(list) = self.scene_items_mut(&scene) {
                    list.push(item);
                }
                Ok(json!({ "inputUuid": format!("uuid-{id}"), "sceneItemId": id }))
            }
            "RemoveInput" => {
                let name = s(d, "inputName");
                self.input_or_fail(req, d)?;
                self.inputs.retain(|i| i.name != name);
                for (_, items) in self.scenes.iter_mut() {
                    items.retain(|i| i.source != name);
                }
                for items in self.groups.values_mut() {
                    items.retain(|i| i.source != name);
                }
                Ok(Value::Null)
            }
            "GetInputMute" => {
                let input = self.input_or_fail(req, d)?;
                match input.muted {
                    Some(m) => Ok(json!({ "inputMuted": m })),
                    None => Err(fail(req, status::INVALID_RESOURCE_STATE, "The specified input does not support audio.")),
                }
            }
            "SetInputMute" => {
                let want = b(d, "inputMuted");
                let input = self.input_or_fail(req, d)?;
                if input.muted.is_none() {
                    return Err(fail(req, status::INVALID_RESOURCE_STATE, "The specified input does not support audio."));
                }
                input.muted = Some(want);
                Ok(Value::Null)
            }
            "GetInputVolume" => {
                let input = self.input_or_fail(req, d)?;
                if input.muted.is_none() {
                    return Err(fail(req, status::INVALID_RESOURCE_STATE, "The specified input does not support audio."));
                }
                let db = input.volume_db;
                Ok(json!({ "inputVolumeDb": db, "inputVolumeMul": 10f64.powf(db / 20.0) }))
            }
            "SetInputVolume" => {
                let db = n(d, "inputVolumeDb");
                let input = self.input_or_fail(req, d)?;
                input.volume_db = db;
                Ok(Value::Null)
            }
            "GetInputSettings" => {
                let input = self.input_or_fail(req, d)?;
                Ok(json!({ "inputKind": input.kind, "inputSettings": input.settings }))
            }
            "SetInputSettings" => {
                let overlay = d.get("overlay").and_then(Value::as_bool).unwrap_or(true);
                let incoming = match d.get("inputSettings") {
                    Some(Value::Object(map)) => map.clone(),
                    _ => return Err(fail(req, status::MISSING_REQUEST_FIELD, "inputSettings missing")),
                };
                let input = self.input_or_fail(req, d)?;
                if overlay {
                    input.settings.extend(incoming);
                } else {
                    input.settings = incoming;
                }
                Ok(Value::Null)
            }
            "GetInputPropertiesListPropertyItems" => {
                let property = s(d, "propertyName");
                let input = self.input_or_fail(req, d)?;
                let items = input
                    .properties
                    .get(&property)
                    .ok_or_else(|| fail(req, status::RESOURCE_NOT_FOUND, "Unable to find a property by that name."))?;
                let list: Vec<Value> = items
                    .iter()
                    .map(|(name, value)| json!({ "itemName": name, "itemValue": value, "itemEnabled": true }))
                    .collect();
                Ok(json!({ "propertyItems": list }))
            }

            /* filters */
            "GetSourceFilterList" => {
                let source = s(d, "sourceName");
                if !self.source_exists(&source) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{source}`.")));
                }
                let list: Vec<Value> = self
                    .filters
                    .get(&source)
                    .map(|fs| {
                        fs.iter()
                            .enumerate()
                            .map(|(idx, f)| json!({
                                "filterName": f.name,
                                "filterKind": f.kind,
                                "filterEnabled": f.enabled,
                                "filterIndex": idx,
                                "filterSettings": f.settings,
                            }))
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(json!({ "filters": list }))
            }
            "GetSourceFilter" => {
                let f = self.filter_or_fail(req, d)?;
                Ok(json!({
                    "filterEnabled": f.enabled,
                    "filterIndex": 0,
                    "filterKind": f.kind,
                    "filterSettings": f.settings,
                }))
            }
            "GetSourceFilterDefaultSettings" => {
                let kind = s(d, "filterKind");
                let defaults = self.filter_defaults.get(&kind).cloned().unwrap_or_default();
                Ok(json!({ "defaultFilterSettings": defaults }))
            }
            "SetSourceFilterEnabled" => {
                let enabled = b(d, "filterEnabled");
                self.filter_or_fail(req, d)?.enabled = enabled;
                Ok(Value::Null)
            }

            /* scene items */
            "GetSceneItemList" => {
                let scene = s(d, "sceneName");
                if !self.has_scene(&scene) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{scene}`.")));
                }
                self.list_items(req, &scene)
            }
            "GetGroupSceneItemList" => {
                let group = s(d, "sceneName");
                if !self.groups.contains_key(&group) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No group was found by the name of `{group}`.")));
                }
                self.list_items(req, &group)
            }
            "GetSceneItemEnabled" => {
                let item = self.item_by_id(req, d)?;
                Ok(json!({ "sceneItemEnabled": item.enabled }))
            }
            "SetSceneItemEnabled" => {
                let enabled = b(d, "sceneItemEnabled");
                self.item_by_id(req, d)?.enabled = enabled;
                Ok(Value::Null)
            }
            "GetSceneItemTransform" => {
                let item = self.item_by_id(req, d)?;
                let mut t = serde_json::to_value(&item.transform)?;
                t["sourceWidth"] = json!(1920.0);
                t["sourceHeight"] = json!(1080.0);
                Ok(json!({ "sceneItemTransform": t }))
            }
            "SetSceneItemTransform" => {
                let patch = d.get("sceneItemTransform").cloned().unwrap_or(Value::Null);
                let item = self.item_by_id(req, d)?;
                let mut current = serde_json::to_value(&item.transform)?;
                if let (Value::Object(cur), Value::Object(p)) = (&mut current, patch) {
                    for (k, v) in p {
                        if k != "sourceWidth" && k != "sourceHeight" {
                            cur.insert(k, v);
                        }
                    }
                }
                item.transform = serde_json::from_value(current)?;
                Ok(Value::Null)
            }

            /* outputs */
            "GetReplayBufferStatus" => Ok(json!({ "outputActive": self.replay_active })),
            "StartReplayBuffer" => Self::output_toggle(req, &mut self.replay_active, Some(true)),
            "StopReplayBuffer" => Self::output_toggle(req, &mut self.replay_active, Some(false)),
            "ToggleReplayBuffer" => Self::output_toggle(req, &mut self.replay_active, None),
            "SaveReplayBuffer" => {
                if !self.replay_active {
                    return Err(fail(req, status::OUTPUT_NOT_RUNNING, "Replay buffer is not active."));
                }
                self.replay_saves += 1;
                Ok(Value::Null)
            }
            "GetVirtualCamStatus" => Ok(json!({ "outputActive": self.vcam_active })),
            "StartVirtualCam" => Self::output_toggle(req, &mut self.vcam_active, Some(true)),
            "StopVirtualCam" => Self::output_toggle(req, &mut self.vcam_active, Some(false)),
            "ToggleVirtualCam" => Self::output_toggle(req, &mut self.vcam_active, None),

            /* record */
            "GetRecordStatus" => Ok(json!({
                "outputActive": self.record_active,
                "outputPaused": self.record_paused,
                "outputTimecode": "00:00:00.000",
                "outputDuration": 0,
                "outputBytes": 0,
            })),
            "StartRecord" => Self::output_toggle(req, &mut self.record_active, Some(true)),
            "StopRecord" => {
                Self::output_toggle(req, &mut self.record_active, Some(false))?;
                self.record_paused = false;
                Ok(json!({ "outputPath": format!("{}/recording.mkv", self.record_dir) }))
            }
            "ToggleRecord" => {
                self.record_active = !self.record_active;
                self.record_paused = false;
                Ok(json!({ "outputActive": self.record_active }))
            }
            "PauseRecord" | "ResumeRecord" => {
                if !self.record_active {
                    return Err(fail(req, status::OUTPUT_NOT_RUNNING, "Recording is not active."));
                }
                self.record_paused = req == "PauseRecord";
                Ok(Value::Null)
            }
            "SplitRecordFile" => Ok(Value::Null),
            "CreateRecordChapter" => {
                let name = d.get("chapterName").and_then(Value::as_str).map(str::to_string);
                self.chapters.push(name);
                Ok(Value::Null)
            }

            /* stream */
            "GetStreamStatus" => Ok(json!({
                "outputActive": self.stream_active,
                "outputDuration": self.stream_duration,
                "outputTimecode": "00:00:00.000",
            })),
            "StartStream" => Self::output_toggle(req, &mut self.stream_active, Some(true)),
            "StopStream" => Self::output_toggle(req, &mut self.stream_active, Some(false)),
            "ToggleStream" => Self::output_toggle(req, &mut self.stream_active, None),

            /* media */
            "GetMediaInputStatus" => {
                let input = self.input_or_fail(req, d)?;
                Ok(json!({
                    "mediaState": "OBS_MEDIA_STATE_PLAYING",
                    "mediaDuration": 600000,
                    "mediaCursor": input.media_cursor,
                }))
            }
            "SetMediaInputCursor" => {
                let cursor = n(d, "mediaCursor");
                self.input_or_fail(req, d)?.media_cursor = cursor;
                Ok(Value::Null)
            }
            "TriggerMediaInputAction" => {
                let action = s(d, "mediaAction");
                self.input_or_fail(req, d)?.media_action = Some(action);
                Ok(Value::Null)
            }

            /* ui */
            "GetStudioModeEnabled" => Ok(json!({ "studioModeEnabled": self.studio_mode })),
            "SetStudioModeEnabled" => {
                self.studio_mode = b(d, "studioModeEnabled");
                Ok(Value::Null)
            }
            "GetMonitorList" => {
                let list: Vec<Value> = self
                    .monitors
                    .iter()
                    .map(|(idx, name)| json!({
                        "monitorIndex": idx,
                        "monitorName": name,
                        "monitorWidth": 1920,
                        "monitorHeight": 1080,
                    }))
                    .collect();
                Ok(json!({ "monitors": list }))
            }
            "OpenSourceProjector" => {
                let source = s(d, "sourceName");
                let monitor = d.get("monitorIndex").and_then(Value::as_i64).unwrap_or(-1);
                self.projectors.push((source, monitor));
                Ok(Value::Null)
            }

            /* sources */
            "SaveSourceScreenshot" => {
                let source = s(d, "sourceName");
                if !self.source_exists(&source) {
                    return Err(fail(req, status::RESOURCE_NOT_FOUND, format!("No source was found by the name of `{source}`.")));
                }
                self.screenshots.push(d.clone());
                Ok(Value::Null)
            }

            _ => Err(fail(req, UNKNOWN_REQUEST_TYPE, "Your request type is not valid.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_request_is_rejected() {
        let mut fake = FakeObs::new();
        let err = fake.request("DoesNotExist", None).await.unwrap_err();
        assert_eq!(err.code(), Some(UNKNOWN_REQUEST_TYPE));
        assert_eq!(fake.calls(), vec!["DoesNotExist"]);
    }

    #[tokio::test]
    async fn audio_less_input_reports_invalid_state() {
        let fake = FakeObs::new().input("Scene", "Color", "color_source_v3");
        let mut client = fake.client();
        let err = client.inputs().muted("Color").await.unwrap_err();
        assert_eq!(err.code(), Some(status::INVALID_RESOURCE_STATE));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let fake = FakeObs::new().scene("Live");
        let mut client = fake.client();
        client.scenes().set_current_program("Live").await.unwrap();
        assert_eq!(fake.state().program, "Live");
        assert_eq!(fake.mutations(), vec!["SetCurrentProgramScene"]);
    }
}
