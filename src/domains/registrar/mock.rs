//! In-memory registrar for tests.
//!
//! Records every request and answers from a queue of canned replies. Bodies
//! go through the same envelope checking as the real client.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::client::{RegistrarApi, interpret_response};
use super::error::{RegistrarError, RegistrarResult, TransportFailure, TransportKind};
use super::form::FormParams;
use super::types::ApiResponse;

enum Reply {
    Body(Value),
    Transport(TransportFailure),
}

pub struct MockRegistrar {
    calls: Mutex<Vec<(String, FormParams)>>,
    replies: Mutex<VecDeque<Reply>>,
    fallback: Value,
}

impl MockRegistrar {
    /// A registrar that answers every call with a bare success envelope.
    pub fn succeeding() -> Self {
        Self::answering(json!({
            "result": "success",
            "answer": {"domains": [{"dname": "example.com", "result": "success"}]}
        }))
    }

    /// A registrar that answers every call with `body`.
    pub fn answering(body: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            fallback: body,
        }
    }

    /// Queue a one-off body ahead of the fallback.
    pub fn then_body(self, body: Value) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Body(body));
        self
    }

    /// Queue a one-off transport failure ahead of the fallback.
    pub fn then_transport_failure(self, kind: TransportKind, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Transport(TransportFailure::with_kind(kind, message)));
        self
    }

    pub fn calls(&self) -> Vec<(String, FormParams)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, FormParams)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RegistrarApi for MockRegistrar {
    async fn request(&self, endpoint: &str, params: FormParams) -> RegistrarResult<ApiResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), params));

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Transport(failure)) => Err(RegistrarError::Transport(failure)),
            Some(Reply::Body(body)) => interpret_response(&serde_json::to_vec(&body).unwrap()),
            None => interpret_response(&serde_json::to_vec(&self.fallback).unwrap()),
        }
    }
}
