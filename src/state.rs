// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::{RpcVerifier, SharedVerifier},
    config::Config,
    rpc::{
        AuthServiceClient, CategoryServiceClient, CommentServiceClient, HttpTransport,
        LikeServiceClient, PostServiceClient, RpcError, RpcTransport, UserServiceClient,
    },
};

/// Shared handler state: one client per backend service plus the verifier
/// used by protected routes.
#[derive(Clone)]
pub struct AppState {
    pub verifier: SharedVerifier,
    pub auth: AuthServiceClient,
    pub users: UserServiceClient,
    pub posts: PostServiceClient,
    pub categories: CategoryServiceClient,
    pub comments: CommentServiceClient,
    pub likes: LikeServiceClient,
}

impl AppState {
    /// Build the clients over the given transports.
    ///
    /// Credentials are verified against the auth service transport.
    pub fn new(
        auth: Arc<dyn RpcTransport>,
        users: Arc<dyn RpcTransport>,
        posts: Arc<dyn RpcTransport>,
    ) -> Self {
        let auth = AuthServiceClient::new(auth);
        Self::with_verifier(
            Arc::new(RpcVerifier::new(auth.clone())),
            auth,
            UserServiceClient::new(users),
            posts,
        )
    }

    pub fn with_verifier(
        verifier: SharedVerifier,
        auth: AuthServiceClient,
        users: UserServiceClient,
        posts: Arc<dyn RpcTransport>,
    ) -> Self {
        Self {
            verifier,
            auth,
            users,
            posts: PostServiceClient::new(posts.clone()),
            categories: CategoryServiceClient::new(posts.clone()),
            comments: CommentServiceClient::new(posts.clone()),
            likes: LikeServiceClient::new(posts),
        }
    }

    /// Connect to the services named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, RpcError> {
        let transport = |url: &url::Url| -> Result<Arc<dyn RpcTransport>, RpcError> {
            Ok(Arc::new(HttpTransport::new(url.clone(), config.rpc_timeout)?))
        };

        Ok(Self::new(
            transport(&config.auth_service_url)?,
            transport(&config.user_service_url)?,
            transport(&config.post_service_url)?,
        ))
    }
}
