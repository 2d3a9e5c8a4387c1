// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Content Gateway - REST front door of the content platform
//!
//! This crate accepts REST requests for posts, comments, likes, categories
//! and user accounts, authorizes protected routes against the remote auth
//! service, and forwards every request as a typed RPC call to the backend
//! services.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Per-route authorization (remote token verification)
//! - `rpc` - Backend service clients
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod rpc;
pub mod state;
