//! In-memory host doubles that record every call the extension makes.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use lsp_types::Position;
use serde_json::{Value, json};

use crate::host::{AppendOptions, EditorHost, ResultsPanel, View, ViewId, Window, WindowId};
use crate::protocol::{JsonRpcMessage, JsonRpcRequest, JsonRpcResponse};
use crate::session::{IMPLEMENTATION_PROVIDER, Session, SessionError};

/// One recorded results-panel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOp {
    /// `set_base_dir` was invoked.
    SetBaseDir(Option<PathBuf>),
    /// `set_read_only` was invoked.
    SetReadOnly(bool),
    /// `clear` was invoked.
    Clear,
    /// `append` was invoked.
    Append(String, AppendOptions),
}

/// Results panel that records its calls.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub ops: Vec<PanelOp>,
}

impl RecordingPanel {
    /// Text appended so far, in order.
    pub fn appended(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PanelOp::Append(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ResultsPanel for RecordingPanel {
    fn set_base_dir(&mut self, base_dir: Option<&Path>) {
        self.ops.push(PanelOp::SetBaseDir(base_dir.map(Path::to_path_buf)));
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.ops.push(PanelOp::SetReadOnly(read_only));
    }

    fn clear(&mut self) {
        self.ops.push(PanelOp::Clear);
    }

    fn append(&mut self, text: &str, options: AppendOptions) {
        self.ops.push(PanelOp::Append(text.to_owned(), options));
    }
}

/// Window double with its own panel.
#[derive(Debug)]
pub struct FakeWindow {
    pub id: WindowId,
    pub project_root: Option<PathBuf>,
    pub panel: RecordingPanel,
    pub panel_shown: usize,
    pub panel_hidden: usize,
    pub statuses: Vec<String>,
}

impl FakeWindow {
    pub fn new(id: u64, project_root: Option<&str>) -> Self {
        Self {
            id: WindowId::new(id),
            project_root: project_root.map(PathBuf::from),
            panel: RecordingPanel::default(),
            panel_shown: 0,
            panel_hidden: 0,
            statuses: Vec::new(),
        }
    }
}

impl Window for FakeWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn project_root(&self) -> Option<PathBuf> {
        self.project_root.clone()
    }

    fn results_panel(&mut self) -> &mut dyn ResultsPanel {
        &mut self.panel
    }

    fn show_results_panel(&mut self) {
        self.panel_shown += 1;
    }

    fn hide_results_panel(&mut self) {
        self.panel_hidden += 1;
    }

    fn status_message(&mut self, message: &str) {
        self.statuses.push(message.to_owned());
    }
}

/// A word in a [`FakeView`], spanning `[start, start + len)` on one line.
#[derive(Debug, Clone)]
pub struct WordSpan {
    pub line: u32,
    pub start: u32,
    pub text: String,
}

impl WordSpan {
    fn contains(&self, position: Position) -> bool {
        let len = u32::try_from(self.text.chars().count()).unwrap_or(u32::MAX);
        position.line == self.line
            && position.character >= self.start
            && position.character < self.start.saturating_add(len)
    }
}

/// View double over a single document.
#[derive(Debug, Clone)]
pub struct FakeView {
    pub id: ViewId,
    pub window: Option<WindowId>,
    pub file_path: Option<PathBuf>,
    pub cursor: Option<Position>,
    pub words: Vec<WordSpan>,
}

impl FakeView {
    pub fn new(id: u64, window: u64, file_path: &str) -> Self {
        Self {
            id: ViewId::new(id),
            window: Some(WindowId::new(window)),
            file_path: Some(PathBuf::from(file_path)),
            cursor: None,
            words: Vec::new(),
        }
    }

    pub fn with_word(mut self, line: u32, start: u32, text: &str) -> Self {
        self.words.push(WordSpan {
            line,
            start,
            text: text.to_owned(),
        });
        self
    }

    pub fn with_cursor(mut self, line: u32, character: u32) -> Self {
        self.cursor = Some(Position::new(line, character));
        self
    }
}

impl View for FakeView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn window_id(&self) -> Option<WindowId> {
        self.window
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.file_path.clone()
    }

    fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    fn is_at_word(&self, position: Position) -> bool {
        self.words.iter().any(|word| word.contains(position))
    }

    fn word_at(&self, position: Position) -> Option<String> {
        self.words
            .iter()
            .find(|word| word.contains(position))
            .map(|word| word.text.clone())
    }
}

/// Editor double owning windows and tracking which views are open.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub windows: HashMap<WindowId, FakeWindow>,
    pub open_views: HashSet<ViewId>,
    pub statuses: Vec<String>,
}

impl FakeHost {
    pub fn with_window(mut self, window: FakeWindow) -> Self {
        self.windows.insert(window.id, window);
        self
    }

    pub fn open(mut self, view: &FakeView) -> Self {
        self.open_views.insert(view.id);
        self
    }

    pub fn close_view(&mut self, view: ViewId) {
        self.open_views.remove(&view);
    }

    pub fn close_window(&mut self, window: WindowId) {
        self.windows.remove(&window);
    }

    pub fn window_ref(&self, id: u64) -> &FakeWindow {
        self.windows
            .get(&WindowId::new(id))
            .expect("window should exist")
    }
}

impl EditorHost for FakeHost {
    fn window(&mut self, id: WindowId) -> Option<&mut dyn Window> {
        self.windows
            .get_mut(&id)
            .map(|window| window as &mut dyn Window)
    }

    fn is_view_valid(&self, id: ViewId) -> bool {
        self.open_views.contains(&id)
    }

    fn status_message(&mut self, message: &str) {
        self.statuses.push(message.to_owned());
    }
}

/// Session double that records requests instead of sending them.
#[derive(Debug)]
pub struct RecordingSession {
    pub alive: bool,
    pub capabilities: HashSet<String>,
    pub sent: Vec<JsonRpcRequest>,
}

impl RecordingSession {
    /// Live session advertising `implementationProvider`.
    pub fn capable() -> Self {
        Self {
            alive: true,
            capabilities: HashSet::from([IMPLEMENTATION_PROVIDER.to_owned()]),
            sent: Vec::new(),
        }
    }

    /// Live session advertising nothing.
    pub fn incapable() -> Self {
        Self {
            capabilities: HashSet::new(),
            ..Self::capable()
        }
    }

    pub fn last_sent(&self) -> &JsonRpcRequest {
        self.sent.last().expect("a request should have been sent")
    }
}

impl Session for RecordingSession {
    fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn send_request(&mut self, request: JsonRpcRequest) -> Result<(), SessionError> {
        self.sent.push(request);
        Ok(())
    }
}

/// `[{uri, range}]` payload for the given `(uri, line, character)` triples.
pub fn locations_payload(entries: &[(&str, u32, u32)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(uri, line, character)| {
                json!({
                    "uri": uri,
                    "range": {
                        "start": {"line": line, "character": character},
                        "end": {"line": line, "character": character.saturating_add(3)}
                    }
                })
            })
            .collect(),
    )
}

/// Successful response message for request `id`.
pub fn response(id: i64, result: Value) -> JsonRpcMessage {
    JsonRpcMessage::Response(JsonRpcResponse::success(id, result))
}
