// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Bearer-token authorization for the gateway, delegated to the remote auth
//! service.
//!
//! ## Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` to a protected route
//! 2. The route's middleware calls `AuthService/VerifyToken` with the token
//!    and the route's `(resource, action)` label
//! 3. The auth service answers with the token's identity claims and whether
//!    the subject may perform the action
//! 4. The claims are bound to the request as a [`Payload`]; handlers read it
//!    through the [`AuthPayload`] extractor
//!
//! ## Status Mapping
//!
//! - Missing or rejected credential → 401
//! - Valid credential without permission → 403
//! - Handler reading the payload on an unprotected route → 500

pub mod error;
pub mod extractor;
pub mod middleware;
pub mod payload;
pub mod user_type;
pub mod verifier;

pub use error::AuthError;
pub use extractor::{bound_payload, AuthPayload};
pub use middleware::{protect, RouteGuard};
pub use payload::{Payload, PayloadFields};
pub use user_type::UserType;
pub use verifier::{CredentialVerifier, Permission, RpcVerifier, SharedVerifier, VerifiedCredential};
