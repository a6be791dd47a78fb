#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use insight_gateway::model::{SubjectEntry, SubjectRecord, Trend};

/// Stand-in for the Gemini REST endpoint. Replies with a fixed status and
/// body, and records every request it receives.
#[derive(Clone)]
pub struct FakeGemini {
    status: u16,
    body: Value,
    seen: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeGemini {
    pub fn replying_text(text: &str) -> Self {
        Self::with(
            200,
            json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}),
        )
    }

    pub fn with(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.seen.lock().unwrap().clone()
    }

    /// Starts the fake on an ephemeral port and returns its API base URL.
    pub fn spawn(&self) -> String {
        let data = web::Data::new(self.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::route().to(handle))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}/v1beta")
    }
}

async fn handle(
    state: web::Data<FakeGemini>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    state
        .seen
        .lock()
        .unwrap()
        .push((req.uri().to_string(), body.into_inner()));
    HttpResponse::build(StatusCode::from_u16(state.status).unwrap()).json(&state.body)
}

/// Upper bound on a round trip to the fake; a hung request fails the test
/// instead of stalling the suite.
pub const ROUND_TRIP: Duration = Duration::from_secs(10);

pub async fn within<F: Future>(fut: F) -> F::Output {
    tokio::time::timeout(ROUND_TRIP, fut)
        .await
        .expect("fake Gemini round trip timed out")
}

pub fn alex() -> SubjectRecord {
    SubjectRecord {
        name: "Alex".to_string(),
        avg_grade: 88.0,
        attendance: 95.0,
        subjects: vec![SubjectEntry {
            name: "Mathematics".to_string(),
            grade: 92.0,
            trend: Trend::Up,
        }],
    }
}
