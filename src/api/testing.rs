// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Handler test fixtures.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    auth::{
        verifier::testing::FakeVerifier, AuthPayload, Payload, PayloadFields, SharedVerifier,
        UserType,
    },
    rpc::{testing::FakeTransport, AuthServiceClient, UserServiceClient},
    state::AppState,
};

/// App state over in-memory backends.
pub(crate) struct Harness {
    pub state: AppState,
    pub auth: Arc<FakeTransport>,
    pub users: Arc<FakeTransport>,
    pub posts: Arc<FakeTransport>,
    pub verifier: Arc<FakeVerifier>,
}

impl Harness {
    pub fn new(auth: FakeTransport, users: FakeTransport, posts: FakeTransport) -> Self {
        Self::with_verifier(FakeVerifier::granting(42, "user", true), auth, users, posts)
    }

    pub fn posts(posts: FakeTransport) -> Self {
        Self::new(FakeTransport::new(), FakeTransport::new(), posts)
    }

    pub fn users(users: FakeTransport) -> Self {
        Self::new(FakeTransport::new(), users, FakeTransport::new())
    }

    pub fn with_verifier(
        verifier: Arc<FakeVerifier>,
        auth: FakeTransport,
        users: FakeTransport,
        posts: FakeTransport,
    ) -> Self {
        let auth = Arc::new(auth);
        let users = Arc::new(users);
        let posts = Arc::new(posts);
        let shared: SharedVerifier = verifier.clone();

        let state = AppState::with_verifier(
            shared,
            AuthServiceClient::new(auth.clone()),
            UserServiceClient::new(users.clone()),
            posts.clone(),
        );

        Self {
            state,
            auth,
            users,
            posts,
            verifier,
        }
    }
}

/// Payload of a request authorized as `user_id`.
pub(crate) fn acting_as(user_id: i64, user_type: UserType) -> AuthPayload {
    let now = Utc::now();
    let payload = Payload::new(PayloadFields {
        id: format!("token-{user_id}"),
        user_id,
        email: format!("user{user_id}@example.com"),
        user_type,
        issued_at: now,
        expired_at: now + Duration::hours(24),
    })
    .unwrap();
    AuthPayload(Arc::new(payload))
}
