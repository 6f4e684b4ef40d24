//! Scripted transport stub shared by the client and view-model tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{ProcedureCall, Transport, TransportFailure};

/// Transport that replays queued responses and records every call.
#[derive(Default)]
pub(crate) struct StubTransport {
    responses: Mutex<VecDeque<Result<Value, TransportFailure>>>,
    calls: Mutex<Vec<ProcedureCall>>,
}

impl StubTransport {
    pub(crate) fn push_ok(&self, value: Value) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Ok(value));
    }

    pub(crate) fn push_status(&self, status: u16, body: &[u8]) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(TransportFailure::Status {
                path: String::new(),
                status,
                body: body.to_vec(),
            }));
    }

    pub(crate) fn push_failure(&self, failure: TransportFailure) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(failure));
    }

    /// Every call observed so far, in order.
    pub(crate) fn calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn call(&self, request: ProcedureCall) -> Result<Value, TransportFailure> {
        self.calls.lock().expect("calls lock").push(request.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                panic!("no scripted response left for {}", request.path)
            })
    }
}
