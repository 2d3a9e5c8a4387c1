// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity claims of a verified credential.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{AuthError, UserType};

/// Identity claims decoded from a verified bearer credential.
///
/// A payload is built once per successful verification and lives for the
/// duration of a single request. Fields are private so nothing downstream of
/// the authorization middleware can alter the identity it bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Payload {
    /// Opaque token identifier assigned by the auth service
    id: String,
    /// Numeric subject (user) identifier
    user_id: i64,
    /// Subject email
    email: String,
    /// Subject type
    #[serde(rename = "type")]
    user_type: UserType,
    issued_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

/// Field set a [`Payload`] is built from.
#[derive(Debug, Clone)]
pub struct PayloadFields {
    pub id: String,
    pub user_id: i64,
    pub email: String,
    pub user_type: UserType,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Build a payload, rejecting claim sets that expire before they were issued.
    pub fn new(fields: PayloadFields) -> Result<Self, AuthError> {
        if fields.issued_at > fields.expired_at {
            return Err(AuthError::InvalidCredential);
        }

        Ok(Self {
            id: fields.id,
            user_id: fields.user_id,
            email: fields.email,
            user_type: fields.user_type,
            issued_at: fields.issued_at,
            expired_at: fields.expired_at,
        })
    }

    /// Check the payload against `now`.
    ///
    /// The expiry instant itself counts as expired.
    pub fn is_valid(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if now >= self.expired_at {
            return Err(AuthError::ExpiredCredential);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expired_at(&self) -> DateTime<Utc> {
        self.expired_at
    }

    /// Whether the payload names a usable subject.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && self.user_id > 0
    }
}
