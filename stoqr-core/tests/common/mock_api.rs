//! In-memory items API for exercising the client over real HTTP.
//!
//! Behaves like the deployed server by default. Individual requests can be
//! scripted with [`MockApi::enqueue`] to inject delays, errors or odd bodies.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use stoqr_core::{Item, ItemId, NewItem};

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

/// A scripted response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.as_bytes().to_vec(),
            delay_ms: 0,
        }
    }

    pub fn items(items: &[Item]) -> Self {
        Self::json(&serde_json::to_string(items).unwrap())
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: message.as_bytes().to_vec(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Default)]
struct Inventory {
    items: Vec<Item>,
    next_id: i64,
}

#[derive(Clone)]
struct MockState {
    inventory: Arc<Mutex<Inventory>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Keyed by "METHOD /path"
    scripted: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
}

/// Mock items API server.
pub struct MockApi {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockApi {
    /// Start a new mock server with an empty inventory.
    pub async fn start() -> Self {
        let state = MockState {
            inventory: Arc::new(Mutex::new(Inventory {
                items: Vec::new(),
                next_id: 1,
            })),
            requests: Arc::new(Mutex::new(Vec::new())),
            scripted: Arc::new(Mutex::new(HashMap::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Base URL of the items API (`http://addr/api`)
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Replace the inventory. New ids continue after the largest seeded id.
    pub async fn seed(&self, items: Vec<Item>) {
        let mut inventory = self.state.inventory.lock().await;
        inventory.next_id = items.iter().map(|i| i.id.0).max().unwrap_or(0) + 1;
        inventory.items = items;
    }

    /// Force the id the next created item gets
    pub async fn set_next_id(&self, id: i64) {
        self.state.inventory.lock().await.next_id = id;
    }

    pub async fn items(&self) -> Vec<Item> {
        self.state.inventory.lock().await.items.clone()
    }

    /// Answer the next `method path` request with `resp` instead of the
    /// in-memory inventory. `path` includes the `/api` prefix.
    pub async fn enqueue(&self, method: &str, path: &str, resp: MockResponse) {
        self.state
            .scripted
            .lock()
            .await
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(resp);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    let body = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();

    state.requests.lock().await.push(CapturedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        body: body.clone(),
    });

    let scripted = state
        .scripted
        .lock()
        .await
        .get_mut(&format!("{} {}", method, path))
        .and_then(VecDeque::pop_front);

    let resp = match scripted {
        Some(resp) => resp,
        None => {
            let mut inventory = state.inventory.lock().await;
            serve(&mut inventory, &method, &path, query.as_deref(), &body)
        }
    };

    if resp.delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(resp.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(resp.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(resp.body))
        .unwrap()
}

fn serve(
    inventory: &mut Inventory,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
) -> MockResponse {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "items"]) => {
            let filter = query
                .and_then(|q| q.strip_prefix("filter="))
                .and_then(|f| urlencoding::decode(f).ok())
                .map(|f| f.to_lowercase());
            let matching: Vec<Item> = inventory
                .items
                .iter()
                .filter(|item| match &filter {
                    Some(f) => item.name.to_lowercase().contains(f.as_str()),
                    None => true,
                })
                .cloned()
                .collect();
            MockResponse::items(&matching)
        }
        ("POST", ["api", "items"]) => {
            let new: NewItem = match serde_json::from_slice(body) {
                Ok(new) => new,
                Err(e) => return MockResponse::error(400, &e.to_string()),
            };
            if new.name.trim().is_empty() {
                return MockResponse::error(400, "name is required");
            }
            let item = new.with_id(ItemId(inventory.next_id));
            inventory.next_id += 1;
            inventory.items.push(item.clone());
            let mut resp = MockResponse::json(&serde_json::to_string(&item).unwrap());
            resp.status = 201;
            resp
        }
        ("GET" | "POST", ["api", "items", "withdraw", id]) => {
            let Some(item) = find(inventory, id) else {
                return MockResponse::empty(404);
            };
            item.actual = item.actual.saturating_sub(1);
            MockResponse::json(&serde_json::to_string(item).unwrap())
        }
        ("GET", ["api", "items", id]) => match find(inventory, id) {
            Some(item) => MockResponse::json(&serde_json::to_string(item).unwrap()),
            None => MockResponse::empty(404),
        },
        ("DELETE", ["api", "items", id]) => {
            let Ok(id) = id.parse::<i64>() else {
                return MockResponse::empty(400);
            };
            let before = inventory.items.len();
            inventory.items.retain(|item| item.id != ItemId(id));
            if inventory.items.len() == before {
                MockResponse::empty(404)
            } else {
                MockResponse::empty(204)
            }
        }
        _ => MockResponse::empty(404),
    }
}

fn find<'a>(inventory: &'a mut Inventory, raw_id: &str) -> Option<&'a mut Item> {
    let id = raw_id.parse::<i64>().ok()?;
    inventory.items.iter_mut().find(|item| item.id == ItemId(id))
}
