#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{FromRequest, Multipart, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_test::TestServer;
use nutriscale_api::{
    application::http::server::http_server::{router, state},
    args::{Args, FirebaseArgs, LlmArgs, LogArgs, ServerArgs, TelegramArgs},
};
use serde_json::{Value, json};

pub const APPLE_REPLY: &str = "```json\n{\n  \"food\": \"Red Apple\",\n  \"nutritional_facts_per_gram\": {\n    \"calories\": 0.475,\n    \"carbohydrates\": { \"total\": 0.125, \"sugars\": 0.095, \"dietary_fiber\": 0.02 },\n    \"protein\": 0.0025,\n    \"fat\": 0.0015,\n    \"vitamin_c\": \"0.07% RDI\",\n    \"potassium_mg\": 0.975,\n    \"water_content\": \"85%\"\n  }\n}\n```";

pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0xFF, 0xD9];

#[derive(Debug, Clone)]
pub enum GeminiBehavior {
    Reply(String),
    Blocked,
    Fail(StatusCode),
}

#[derive(Debug, Clone)]
pub struct RelayedPhoto {
    pub chat_id: String,
    pub caption: String,
    pub photo: Bytes,
    pub file_name: Option<String>,
}

/// In-process stand-in for the Gemini, Firebase and Telegram HTTP APIs.
#[derive(Clone)]
pub struct FakeUpstream {
    gemini: Arc<Mutex<GeminiBehavior>>,
    gemini_requests: Arc<Mutex<Vec<Value>>>,
    store: Arc<Mutex<HashMap<String, Value>>>,
    store_writable: Arc<Mutex<bool>>,
    telegram_ok: Arc<Mutex<bool>>,
    relayed: Arc<Mutex<Vec<RelayedPhoto>>>,
}

impl Default for FakeUpstream {
    fn default() -> Self {
        Self {
            gemini: Arc::new(Mutex::new(GeminiBehavior::Reply(APPLE_REPLY.to_string()))),
            gemini_requests: Arc::default(),
            store: Arc::default(),
            store_writable: Arc::new(Mutex::new(true)),
            telegram_ok: Arc::new(Mutex::new(true)),
            relayed: Arc::default(),
        }
    }
}

impl FakeUpstream {
    pub fn set_gemini(&self, behavior: GeminiBehavior) {
        *self.gemini.lock().unwrap() = behavior;
    }

    pub fn set_store_writable(&self, writable: bool) {
        *self.store_writable.lock().unwrap() = writable;
    }

    pub fn set_telegram_ok(&self, ok: bool) {
        *self.telegram_ok.lock().unwrap() = ok;
    }

    pub fn put(&self, path: &str, value: Value) {
        self.store.lock().unwrap().insert(path.to_string(), value);
    }

    pub fn stored(&self, path: &str) -> Option<Value> {
        self.store.lock().unwrap().get(path).cloned()
    }

    pub fn gemini_requests(&self) -> Vec<Value> {
        self.gemini_requests.lock().unwrap().clone()
    }

    pub fn relayed(&self) -> Vec<RelayedPhoto> {
        self.relayed.lock().unwrap().clone()
    }

    /// Serves the fake on an ephemeral port and returns its base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn handle(State(upstream): State<FakeUpstream>, request: Request) -> Response {
    let path = request.uri().path().to_string();

    if path.starts_with("/v1beta/models/") && path.ends_with(":generateContent") {
        return gemini(upstream, request).await;
    }
    if let Some(store_path) = path
        .strip_prefix("/db/")
        .and_then(|p| p.strip_suffix(".json"))
    {
        let store_path = store_path.to_string();
        return firebase(upstream, store_path, request).await;
    }
    if path.starts_with("/bot") && path.ends_with("/sendPhoto") {
        return telegram(upstream, request).await;
    }

    StatusCode::NOT_FOUND.into_response()
}

async fn gemini(upstream: FakeUpstream, request: Request) -> Response {
    let Json(body) = Json::<Value>::from_request(request, &()).await.unwrap();
    upstream.gemini_requests.lock().unwrap().push(body);

    let behavior = upstream.gemini.lock().unwrap().clone();
    match behavior {
        GeminiBehavior::Reply(text) => Json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        }))
        .into_response(),
        GeminiBehavior::Blocked => Json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .into_response(),
        GeminiBehavior::Fail(status) => {
            (status, Json(json!({ "error": { "message": "quota exceeded" } }))).into_response()
        }
    }
}

async fn firebase(upstream: FakeUpstream, path: String, request: Request) -> Response {
    let streaming = request
        .headers()
        .get(header::ACCEPT)
        .is_some_and(|accept| accept == "text/event-stream");

    if request.method() == axum::http::Method::PUT {
        if !*upstream.store_writable.lock().unwrap() {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Permission denied" })),
            )
                .into_response();
        }
        let Json(value) = Json::<Value>::from_request(request, &()).await.unwrap();
        upstream.put(&path, value.clone());
        return Json(value).into_response();
    }

    let value = upstream.stored(&path).unwrap_or(Value::Null);

    if streaming {
        // One snapshot, a keep-alive, then the stream closes.
        let body = format!(
            "event: put\ndata: {}\n\nevent: keep-alive\ndata: null\n\n",
            json!({ "path": "/", "data": value })
        );
        return (
            [(header::CONTENT_TYPE, "text/event-stream")],
            Body::from(body),
        )
            .into_response();
    }

    Json(value).into_response()
}

async fn telegram(upstream: FakeUpstream, request: Request) -> Response {
    let mut multipart = Multipart::from_request(request, &()).await.unwrap();

    let mut photo = RelayedPhoto {
        chat_id: String::new(),
        caption: String::new(),
        photo: Bytes::new(),
        file_name: None,
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name().unwrap_or_default() {
            "chat_id" => photo.chat_id = field.text().await.unwrap(),
            "caption" => photo.caption = field.text().await.unwrap(),
            "photo" => {
                photo.file_name = field.file_name().map(str::to_string);
                photo.photo = field.bytes().await.unwrap();
            }
            _ => {}
        }
    }

    upstream.relayed.lock().unwrap().push(photo);

    if *upstream.telegram_ok.lock().unwrap() {
        Json(json!({ "ok": true, "result": { "message_id": 1 } })).into_response()
    } else {
        Json(json!({ "ok": false, "error_code": 400, "description": "Bad Request: chat not found" }))
            .into_response()
    }
}

pub struct TestContext {
    pub server: TestServer,
    pub upstream: FakeUpstream,
}

pub fn test_args(base_url: &str, relay_configured: bool) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            metrics_enabled: false,
            tls_cert_path: None,
            tls_key_path: None,
        },
        llm: LlmArgs {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.0-flash-lite".to_string(),
            gemini_api_base_url: base_url.to_string(),
        },
        firebase: FirebaseArgs {
            firebase_database_url: format!("{}/db", base_url),
            firebase_auth: None,
        },
        telegram: TelegramArgs {
            telegram_bot_token: relay_configured.then(|| "123456:test-token".to_string()),
            telegram_chat_id: relay_configured.then(|| "4242".to_string()),
            telegram_api_base_url: base_url.to_string(),
            relay_caption_label: "Gemini".to_string(),
        },
        log: LogArgs {
            filter: "info".to_string(),
            json: false,
        },
    }
}

pub async fn setup_with(relay_configured: bool) -> TestContext {
    let upstream = FakeUpstream::default();
    let base_url = upstream.spawn().await;

    let app_state = state(Arc::new(test_args(&base_url, relay_configured)))
        .await
        .unwrap();
    let app = router(app_state).unwrap();

    TestContext {
        server: TestServer::new(app).unwrap(),
        upstream,
    }
}

pub async fn setup() -> TestContext {
    setup_with(true).await
}

pub fn record_json(timestamp: i64) -> Value {
    json!({
        "food": "Red Apple",
        "nutritional_facts_per_gram": {
            "calories": 0.475,
            "carbohydrates": { "total": 0.125, "sugars": 0.095, "dietary_fiber": 0.02 },
            "protein": 0.0025,
            "fat": 0.0015,
            "vitamin_c": "0.07% RDI",
            "potassium_mg": 0.975,
            "water_content": "85%"
        },
        "timestamp": timestamp
    })
}
