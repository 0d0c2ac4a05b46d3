//! In-memory collaborators for unit tests: no sockets, no terminal.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use inkwell_shared::PostId;
use tokio::sync::oneshot;

use crate::ports::{
    AddressBar, ApiRequest, ApiResponse, Confirm, EditorSurface, Method, Transport, TransportError,
};
use crate::sync::{SyncConfig, SyncEngine};

enum Reply {
    Ready(ApiResponse),
    Deferred(oneshot::Receiver<ApiResponse>),
    NetworkDown,
}

/// Scripted transport. Replies are queued per method + path, FIFO.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    routes: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<ApiRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, method: Method, path: impl Into<String>, response: ApiResponse) {
        self.queue(method, path.into(), Reply::Ready(response));
    }

    pub fn push_json(
        &self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) {
        self.push(method, path, ApiResponse::new(status, body.to_string()));
    }

    /// Reply later, once the returned sender is used.
    pub fn push_deferred(
        &self,
        method: Method,
        path: impl Into<String>,
    ) -> oneshot::Sender<ApiResponse> {
        let (tx, rx) = oneshot::channel();
        self.queue(method, path.into(), Reply::Deferred(rx));
        tx
    }

    pub fn push_network_error(&self, method: Method, path: impl Into<String>) {
        self.queue(method, path.into(), Reply::NetworkDown);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner
            .lock()
            .expect("mock transport lock should not be poisoned")
            .requests
            .clone()
    }

    fn queue(&self, method: Method, path: String, reply: Reply) {
        self.inner
            .lock()
            .expect("mock transport lock should not be poisoned")
            .routes
            .entry((method, path))
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            let key = (request.method, request.path.clone());
            inner.requests.push(request);
            inner.routes.get_mut(&key).and_then(|queue| queue.pop_front())
        };

        match reply {
            Some(Reply::Ready(response)) => Ok(response),
            Some(Reply::Deferred(rx)) => rx
                .await
                .map_err(|_| TransportError::Network("deferred reply dropped".to_string())),
            Some(Reply::NetworkDown) => Err(TransportError::Network("connection refused".into())),
            None => Err(TransportError::Network("no mock reply registered".to_string())),
        }
    }
}

/// Editor with a title, a body, and a caret at the end of the body.
#[derive(Default)]
pub struct MemoryEditor {
    title: Mutex<String>,
    content: Mutex<String>,
}

impl MemoryEditor {
    pub fn with(title: &str, content: &str) -> Self {
        Self {
            title: Mutex::new(title.to_string()),
            content: Mutex::new(content.to_string()),
        }
    }
}

impl EditorSurface for MemoryEditor {
    fn title(&self) -> String {
        self.title.lock().unwrap().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.lock().unwrap() = title.to_string();
    }

    fn content(&self) -> String {
        self.content.lock().unwrap().clone()
    }

    fn set_content(&self, content: &str) {
        *self.content.lock().unwrap() = content.to_string();
    }

    fn insert_at_selection(&self, text: &str) {
        self.content.lock().unwrap().push_str(text);
    }
}

/// Address bar that records what it was asked to do.
#[derive(Default)]
pub struct RecordingAddress {
    pub id: Mutex<Option<PostId>>,
    pub navigated: Mutex<Vec<String>>,
}

impl RecordingAddress {
    pub fn at(id: &str) -> Self {
        Self {
            id: Mutex::new(Some(PostId::new(id))),
            navigated: Mutex::default(),
        }
    }

    pub fn shown_id(&self) -> Option<PostId> {
        self.id.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigated.lock().unwrap().clone()
    }
}

impl AddressBar for RecordingAddress {
    fn current_post_id(&self) -> Option<PostId> {
        self.shown_id()
    }

    fn replace_post_id(&self, id: &PostId) {
        *self.id.lock().unwrap() = Some(id.clone());
    }

    fn navigate(&self, location: &str) {
        self.navigated.lock().unwrap().push(location.to_string());
    }
}

pub struct Answer(pub bool);

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// An engine wired to fakes, plus handles on the fakes.
pub struct Harness {
    pub engine: Arc<SyncEngine>,
    pub transport: MockTransport,
    pub editor: Arc<MemoryEditor>,
    pub address: Arc<RecordingAddress>,
}

impl Harness {
    pub fn new(editor: MemoryEditor, address: RecordingAddress, confirm: bool) -> Self {
        let transport = MockTransport::new();
        let editor = Arc::new(editor);
        let address = Arc::new(address);
        let engine = Arc::new(SyncEngine::new(
            SyncConfig::default(),
            Arc::new(transport.clone()),
            editor.clone(),
            address.clone(),
            Arc::new(Answer(confirm)),
        ));
        Self {
            engine,
            transport,
            editor,
            address,
        }
    }

    pub fn draft(title: &str, content: &str) -> Self {
        Self::new(MemoryEditor::with(title, content), RecordingAddress::default(), true)
    }
}
