// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{RpcCode, RpcError, RpcTransport};

/// Replies with canned responses per method and records every call.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<HashMap<String, Result<Value, RpcError>>>,
    calls: Mutex<Vec<(String, Value)>>,
    unhealthy: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unhealthy() -> Self {
        Self {
            unhealthy: true,
            ..Self::default()
        }
    }

    /// Reply to `method` with `response`.
    pub fn with_reply(self, method: &str, response: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Ok(response));
        self
    }

    /// Fail `method` with `error`.
    pub fn with_error(self, method: &str, error: RpcError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Request body of the only call made to `method`.
    pub fn request_for(&self, method: &str) -> Value {
        let calls: Vec<_> = self
            .calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .collect();
        assert_eq!(calls.len(), 1, "expected exactly one call to {method}");
        calls[0].1.clone()
    }
}

#[async_trait]
impl RpcTransport for FakeTransport {
    async fn invoke(&self, method: &str, request: Value) -> Result<Value, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), request));

        self.replies
            .lock()
            .unwrap()
            .get(method)
            .cloned()
            .unwrap_or_else(|| Err(RpcError::status(RpcCode::Internal, format!("no reply for {method}"))))
    }

    async fn ping(&self) -> Result<(), RpcError> {
        if self.unhealthy {
            Err(RpcError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}
