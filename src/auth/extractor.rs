// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the identity bound by the authorization middleware.
//!
//! Use the `AuthPayload` extractor in handlers of protected routes:
//!
//! ```rust,ignore
//! async fn my_handler(AuthPayload(payload): AuthPayload) -> impl IntoResponse {
//!     // payload.user_id() is the acting user
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Extensions},
};

use super::{AuthError, Payload};

/// Request-scoped slot written by the middleware.
///
/// The constructor is crate-private so the middleware stays the only writer.
#[derive(Debug, Clone)]
pub(crate) struct BoundPayload(Arc<Payload>);

impl BoundPayload {
    pub(crate) fn new(payload: Payload) -> Self {
        Self(Arc::new(payload))
    }
}

/// Read the payload bound to the current request.
///
/// Fails with `PayloadNotBound` when the route never ran the middleware and
/// `PayloadMalformed` when the bound identity has no usable subject.
pub fn bound_payload(extensions: &Extensions) -> Result<&Payload, AuthError> {
    bound(extensions).map(Arc::as_ref)
}

fn bound(extensions: &Extensions) -> Result<&Arc<Payload>, AuthError> {
    let BoundPayload(payload) = extensions.get::<BoundPayload>().ok_or_else(|| {
        tracing::error!("Handler reads the authorization payload on an unprotected route");
        AuthError::PayloadNotBound
    })?;

    if !payload.is_well_formed() {
        tracing::error!(user_id = payload.user_id(), "Bound authorization payload is malformed");
        return Err(AuthError::PayloadMalformed);
    }
    Ok(payload)
}

/// Extractor for the identity of the acting user.
///
/// Only valid on routes wrapped with [`protect`](super::middleware::protect).
pub struct AuthPayload(pub Arc<Payload>);

impl<S> FromRequestParts<S> for AuthPayload
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bound(&parts.extensions).cloned().map(AuthPayload)
    }
}
