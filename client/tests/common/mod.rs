//! In-memory backend shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use stock_admin_client::{
    AdminContext, ApiRequest, ApiResponse, ClientError, ClientResult, Config, Method, Transport,
};

/// Canned answer to one request
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
    pub unreachable: bool,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
            unreachable: false,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn unreachable() -> Self {
        Self {
            status: 0,
            body: String::new(),
            delay: None,
            unreachable: true,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Transport answering from per-route reply queues and recording requests.
///
/// The last reply of a queue is reused once the others are consumed.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let reply = self.next_reply(request.method, &request.path);
        self.requests.lock().unwrap().push(request);

        let reply = match reply {
            Some(reply) => reply,
            None => return Ok(ApiResponse::new(404, r#"{"message": "Route introuvable"}"#)),
        };
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        if reply.unreachable {
            return Err(ClientError::Transport("connection refused".into()));
        }
        Ok(ApiResponse::new(reply.status, reply.body))
    }
}

pub fn context(transport: Arc<FakeTransport>) -> AdminContext {
    AdminContext::with_transport(Config::defaults().unwrap(), transport)
}

pub fn context_with(transport: Arc<FakeTransport>, edit: impl FnOnce(&mut Config)) -> AdminContext {
    let mut config = Config::defaults().unwrap();
    edit(&mut config);
    AdminContext::with_transport(config, transport)
}
