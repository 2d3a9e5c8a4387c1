// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-route authorization middleware for Axum.
//!
//! Every protected route carries a static [`Permission`]. For each request the
//! middleware:
//!
//! 1. reads the bearer credential from the `Authorization` header, failing with
//!    `MissingCredential` before any remote call when it is absent or empty;
//! 2. makes exactly one call to the [`CredentialVerifier`];
//! 3. rejects with `Forbidden` when the verifier denies the permission;
//! 4. binds the resulting [`Payload`] into the request extensions and runs the
//!    next handler.
//!
//! Nothing is cached between requests. If the client goes away while the
//! verifier call is in flight, the request future is dropped together with
//! that call, so no payload is bound and the handler never runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let route = protect(
//!     post(comments::create_comment),
//!     &state.verifier,
//!     Permission::new("comment", "create"),
//! );
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use chrono::Utc;

use super::extractor::BoundPayload;
use super::verifier::{Permission, SharedVerifier};
use super::{AuthError, Payload};

/// Verifier plus the permission one route requires.
#[derive(Clone)]
pub struct RouteGuard {
    verifier: SharedVerifier,
    permission: Permission,
}

impl RouteGuard {
    pub fn new(verifier: SharedVerifier, permission: Permission) -> Self {
        Self {
            verifier,
            permission,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Verify `access_token` for this route's permission.
    pub async fn check(&self, access_token: &str) -> Result<Payload, AuthError> {
        let verified = self
            .verifier
            .verify(access_token, self.permission)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    resource = self.permission.resource,
                    action = self.permission.action,
                    error = %e,
                    "Credential verification failed"
                );
            })?;

        if !verified.has_permission {
            tracing::info!(
                resource = self.permission.resource,
                action = self.permission.action,
                user_id = verified.user_id,
                "Permission denied"
            );
            return Err(AuthError::Forbidden);
        }

        let payload = verified.to_payload()?;
        payload.is_valid(Utc::now())?;

        tracing::debug!(
            resource = self.permission.resource,
            action = self.permission.action,
            user_id = payload.user_id(),
            "Request authorized"
        );
        Ok(payload)
    }
}

/// Extract the raw credential from the `Authorization` header.
///
/// Both `Bearer <token>` and a bare token are accepted.
pub fn bearer_credential(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::InvalidCredential)?
        .trim();

    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}

/// Authorization middleware function.
pub async fn require_permission(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    let access_token = match bearer_credential(request.headers()) {
        Ok(token) => token.to_owned(),
        Err(e) => {
            tracing::debug!(
                resource = guard.permission.resource,
                action = guard.permission.action,
                "Rejecting request without credential"
            );
            return e.into_response();
        }
    };

    match guard.check(&access_token).await {
        Ok(payload) => {
            request.extensions_mut().insert(BoundPayload::new(payload));
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Put `route` behind the authorization middleware for `permission`.
pub fn protect<S>(
    route: MethodRouter<S>,
    verifier: &SharedVerifier,
    permission: Permission,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(
        RouteGuard::new(verifier.clone(), permission),
        require_permission,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use chrono::Duration;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::verifier::testing::{credential, FakeVerifier};
    use crate::auth::verifier::{CredentialVerifier, VerifiedCredential};
    use crate::auth::AuthPayload;

    const COMMENT_CREATE: Permission = Permission::new("comment", "create");

    #[derive(Clone, Default)]
    struct Seen {
        runs: Arc<AtomicUsize>,
        user_id: Arc<Mutex<Option<i64>>>,
    }

    fn app(verifier: Arc<FakeVerifier>, seen: Seen) -> Router {
        let verifier: SharedVerifier = verifier;
        let handler = move |AuthPayload(payload): AuthPayload| {
            let seen = seen.clone();
            async move {
                seen.runs.fetch_add(1, Ordering::SeqCst);
                *seen.user_id.lock().unwrap() = Some(payload.user_id());
                StatusCode::CREATED
            }
        };
        Router::new().route("/comments", protect(post(handler), &verifier, COMMENT_CREATE))
    }

    fn request(authorization: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method("POST").uri("/comments");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn error_code(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error_code"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn missing_credential_is_401_without_remote_call() {
        let verifier = FakeVerifier::granting(42, "user", true);
        let seen = Seen::default();

        let response = app(verifier.clone(), seen.clone())
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "missing_credential");
        assert_eq!(verifier.calls(), 0);
        assert_eq!(seen.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_credential_is_401_without_remote_call() {
        for value in ["", "   ", "Bearer", "Bearer   "] {
            let verifier = FakeVerifier::granting(42, "user", true);
            let response = app(verifier.clone(), Seen::default())
                .oneshot(request(Some(value)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header {value:?}");
            assert_eq!(verifier.calls(), 0, "header {value:?}");
        }
    }

    #[tokio::test]
    async fn granted_permission_binds_payload_and_runs_handler_once() {
        let verifier = FakeVerifier::granting(42, "user", true);
        let seen = Seen::default();

        let response = app(verifier.clone(), seen.clone())
            .oneshot(request(Some("tok-abc")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(verifier.calls(), 1);
        assert_eq!(seen.runs.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.user_id.lock().unwrap(), Some(42));
        assert_eq!(
            verifier.last_request(),
            Some(("tok-abc".to_string(), COMMENT_CREATE))
        );
    }

    #[tokio::test]
    async fn bearer_scheme_is_stripped() {
        let verifier = FakeVerifier::granting(42, "user", true);

        let response = app(verifier.clone(), Seen::default())
            .oneshot(request(Some("Bearer tok-abc")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(verifier.last_request().unwrap().0, "tok-abc");
    }

    #[tokio::test]
    async fn denied_permission_is_403() {
        let verifier = FakeVerifier::granting(7, "user", false);
        let seen = Seen::default();

        let response = app(verifier.clone(), seen.clone())
            .oneshot(request(Some("tok-7")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(response).await, "forbidden");
        assert_eq!(seen.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denied_permission_wins_over_expiry() {
        let mut expired = credential(7, "user", false);
        expired.issued_at = Utc::now() - Duration::hours(48);
        expired.expired_at = Utc::now() - Duration::hours(24);
        let verifier = FakeVerifier::returning(Ok(expired));

        let response = app(verifier, Seen::default())
            .oneshot(request(Some("tok-7")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn rejected_credential_is_401() {
        for error in [
            AuthError::InvalidCredential,
            AuthError::ExpiredCredential,
            AuthError::VerifierUnavailable("connection refused".into()),
        ] {
            let verifier = FakeVerifier::returning(Err(error.clone()));
            let seen = Seen::default();

            let response = app(verifier.clone(), seen.clone())
                .oneshot(request(Some("tok")))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{error:?}");
            assert_eq!(error_code(response).await, error.error_code());
            assert_eq!(verifier.calls(), 1);
            assert_eq!(seen.runs.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn expired_payload_is_401() {
        let mut expired = credential(42, "user", true);
        expired.issued_at = Utc::now() - Duration::hours(48);
        expired.expired_at = Utc::now() - Duration::hours(24);
        let verifier = FakeVerifier::returning(Ok(expired));

        let response = app(verifier, Seen::default())
            .oneshot(request(Some("tok")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "expired_credential");
    }

    #[tokio::test]
    async fn every_request_is_verified() {
        let verifier = FakeVerifier::granting(42, "user", true);
        let app = app(verifier.clone(), Seen::default());

        for _ in 0..3 {
            let response = app.clone().oneshot(request(Some("tok-abc"))).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }
        assert_eq!(verifier.calls(), 3);
    }

    /// Verifier that never answers, recording whether its call was dropped.
    #[derive(Default)]
    struct StalledVerifier {
        calls: AtomicUsize,
        started: Notify,
        abandoned: Arc<AtomicBool>,
    }

    struct AbandonOnDrop(Arc<AtomicBool>);

    impl Drop for AbandonOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl CredentialVerifier for StalledVerifier {
        async fn verify(
            &self,
            _access_token: &str,
            _permission: Permission,
        ) -> Result<VerifiedCredential, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _guard = AbandonOnDrop(self.abandoned.clone());
            self.started.notify_one();
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn cancelled_request_never_reaches_handler() {
        let verifier = Arc::new(StalledVerifier::default());
        let seen = Seen::default();
        let shared: SharedVerifier = verifier.clone();
        let handler = {
            let seen = seen.clone();
            move |AuthPayload(payload): AuthPayload| {
                let seen = seen.clone();
                async move {
                    seen.runs.fetch_add(1, Ordering::SeqCst);
                    *seen.user_id.lock().unwrap() = Some(payload.user_id());
                    StatusCode::CREATED
                }
            }
        };
        let app = Router::new().route("/comments", protect(post(handler), &shared, COMMENT_CREATE));

        let in_flight = app.oneshot(request(Some("tok-abc")));
        tokio::select! {
            _ = in_flight => panic!("request finished while verification was pending"),
            _ = verifier.started.notified() => {}
        }
        tokio::task::yield_now().await;

        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        assert!(verifier.abandoned.load(Ordering::SeqCst));
        assert_eq!(seen.runs.load(Ordering::SeqCst), 0);
        assert_eq!(*seen.user_id.lock().unwrap(), None);
    }

    #[test]
    fn bearer_credential_accepts_bare_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "tok-abc".parse().unwrap());
        assert_eq!(bearer_credential(&headers), Ok("tok-abc"));

        headers.insert(AUTHORIZATION, "bearer  tok-abc ".parse().unwrap());
        assert_eq!(bearer_credential(&headers), Ok("tok-abc"));
    }
}
