//! Loopback HTTP server for client tests. Records every request and answers
//! from a queue of canned replies (`200 {}` once the queue runs dry).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{HeaderName, AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    response::IntoResponse,
    Router,
};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct HttpStub {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    replies: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
}

impl HttpStub {
    /// Binds `127.0.0.1:0` and returns the base url with the stub handle.
    pub async fn start(replies: Vec<(u16, &str)>) -> (String, HttpStub) {
        let stub = HttpStub::default();
        {
            let mut queue = stub.replies.lock().unwrap();
            for (status, body) in replies {
                queue.push_back((StatusCode::from_u16(status).unwrap(), body.to_string()));
            }
        }

        let app = Router::new().fallback(record).with_state(stub.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), stub)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let Some(raw) = raw else {
        return HashMap::new();
    };
    reqwest::Url::parse(&format!("http://stub/?{raw}"))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

async fn record(State(stub): State<HttpStub>, req: Request<Body>) -> impl IntoResponse {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    stub.seen.lock().unwrap().push(SeenRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parse_query(parts.uri.query()),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    let (status, body) = stub
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, "{}".to_string()));
    (status, [(CONTENT_TYPE, "application/json")], body)
}
