// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subject types carried by a verified credential.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classifier of the subject a credential was issued to.
///
/// ## Hierarchy
///
/// - `Superadmin` - Everything an admin can do, plus changing user types
/// - `Admin` - Moderation across all authors
/// - `User` - Regular author, acts on own content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    User,
    Admin,
    Superadmin,
}

impl UserType {
    /// Check if this type has at least the privileges of the required type.
    pub fn has_privilege(&self, required: UserType) -> bool {
        self.rank() >= required.rank()
    }

    /// Parse a user type (case-insensitive).
    pub fn from_str(s: &str) -> Option<UserType> {
        match s.to_lowercase().as_str() {
            "user" => Some(UserType::User),
            "admin" => Some(UserType::Admin),
            "superadmin" => Some(UserType::Superadmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "user",
            UserType::Admin => "admin",
            UserType::Superadmin => "superadmin",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            UserType::User => 0,
            UserType::Admin => 1,
            UserType::Superadmin => 2,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
