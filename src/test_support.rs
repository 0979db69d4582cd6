//! In-process fake backend for client tests.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::navigation::RedirectLog;
use crate::notify::NotificationLog;
use crate::session::{keys, MemorySessionStore, SessionStore};

/// What the fake backend saw of one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub csrf: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let seen = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        SeenRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(String::from),
            authorization: header("authorization"),
            csrf: header("x-csrftoken"),
            content_type: header("content-type"),
        }
    };
    recorder.seen.lock().push(seen);
    next.run(request).await
}

/// Client, collaborators and the fake backend they talk to.
pub struct Harness {
    pub client: ApiClient,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RedirectLog>,
    pub notifier: Arc<NotificationLog>,
    pub recorder: Recorder,
}

impl Harness {
    /// Another client sharing this harness' collaborators.
    pub fn client_for(&self, base_url: &str) -> ApiClient {
        build_client(
            base_url,
            self.store.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
        )
    }
}

/// Serve `routes` under `/api` on an ephemeral port.
pub async fn harness(routes: Router) -> Harness {
    crate::logging::init_test();

    let recorder = Recorder::default();
    let app = Router::new()
        .nest("/api", routes.route("/ping/", get(|| async { "pong" })))
        .layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let store = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(RedirectLog::new());
    let notifier = Arc::new(NotificationLog::new());
    let client = build_client(
        &format!("http://{}/api", addr),
        store.clone(),
        navigator.clone(),
        notifier.clone(),
    );

    Harness {
        client,
        store,
        navigator,
        notifier,
        recorder,
    }
}

fn build_client(
    base_url: &str,
    store: Arc<MemorySessionStore>,
    navigator: Arc<RedirectLog>,
    notifier: Arc<NotificationLog>,
) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
        ..ApiConfig::default()
    };
    ApiClient::new(&config, "/login/", store, navigator, notifier).unwrap()
}

/// Store a credential and role as the login page would.
pub fn sign_in(store: &MemorySessionStore, token: &str, role: &str) {
    store.set(keys::AUTH_TOKEN, token).unwrap();
    store.set(keys::USER_ROLE, role).unwrap();
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
