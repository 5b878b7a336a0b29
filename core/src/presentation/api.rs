// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # HTTP Surface
//!
//! Route table (protected routes require a valid bearer session token):
//!
//! ```text
//! POST   /login                      rate-limited credential exchange
//! GET    /containers                 live container list
//! POST   /containers/{id}/{action}   start/stop
//! GET    /container-links            stored links, pruned against live state
//! POST   /container-links            upsert or remove one link
//! GET    /website-links              stored bookmarks
//! POST   /website-links              add bookmark (metadata fetched if absent)
//! DELETE /website-links              remove bookmark
//! GET    /api/website-info?url=      fetch {title, icon} without storing
//! ```
//!
//! [`require_session`] is the single gate in front of every protected route:
//! it verifies the bearer token and short-circuits with 401 before any
//! business logic runs. Every failure is rendered as a JSON body
//! `{error, details}`; the details carry the underlying error chain, which
//! is acceptable for an internal admin tool.

use axum::{
    extract::{FromRequestParts, Path, Query, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::containers::ContainerControlService;
use crate::application::links::{LinkError, LinkService};
use crate::application::session::SessionService;
use crate::application::websites::{WebsiteError, WebsiteService};
use crate::domain::auth::AuthError;
use crate::domain::container::{ContainerSummary, GatewayError};
use crate::domain::link::LinkMap;
use crate::domain::website::{WebsiteBookmark, WebsiteMap};

pub struct AppState {
    pub sessions: SessionService,
    pub containers: ContainerControlService,
    pub links: LinkService,
    pub websites: WebsiteService,
}

/// Build the dashboard router.
pub fn app(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/containers", get(list_containers))
        .route("/containers/{id}/{action}", post(control_container))
        .route("/container-links", get(get_container_links).post(set_container_link))
        .route(
            "/website-links",
            get(get_website_links)
                .post(add_website_link)
                .delete(delete_website_link),
        )
        .route("/api/website-info", get(website_info))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/login", post(login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Username attached to the request after token verification.
#[derive(Debug, Clone)]
pub struct SessionUser(pub String);

/// Bearer-token gate for all protected routes.
async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let username = state.sessions.verify_bearer(header)?;
    request.extensions_mut().insert(SessionUser(username));
    Ok(next.run(request).await)
}

/// Source address of the client, falling back to loopback when the listener
/// was not set up with connect info (as in router-level tests).
struct ClientIp(IpAddr);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<axum::extract::ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        Ok(Self(ip))
    }
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginUser {
    username: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    user: LoginUser,
}

async fn login(
    State(state): State<Arc<AppState>>,
    ClientIp(source): ClientIp,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.sessions.login(source, &payload.username, &payload.password)?;
    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            username: payload.username,
        },
    }))
}

async fn list_containers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContainerSummary>>, ApiError> {
    Ok(Json(state.containers.list().await?))
}

async fn control_container(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.containers.control(&id, &action).await?;
    Ok(StatusCode::OK)
}

async fn get_container_links(State(state): State<Arc<AppState>>) -> Result<Json<LinkMap>, ApiError> {
    Ok(Json(state.links.links().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetLinkRequest {
    container_id: String,
    /// Absent or empty removes the link.
    #[serde(default)]
    link: Option<String>,
}

async fn set_container_link(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetLinkRequest>,
) -> Result<StatusCode, ApiError> {
    state.links.set_link(&payload.container_id, payload.link).await?;
    Ok(StatusCode::OK)
}

async fn get_website_links(State(state): State<Arc<AppState>>) -> Result<Json<WebsiteMap>, ApiError> {
    Ok(Json(state.websites.list_websites().await?))
}

#[derive(Debug, Deserialize)]
struct AddWebsiteRequest {
    url: String,
    /// When absent, metadata is fetched from the target page.
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

async fn add_website_link(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddWebsiteRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .websites
        .add_website(&payload.url, payload.title, payload.icon)
        .await?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct DeleteWebsiteRequest {
    url: String,
}

async fn delete_website_link(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DeleteWebsiteRequest>,
) -> Result<StatusCode, ApiError> {
    state.websites.delete_website(&payload.url).await?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct WebsiteInfoQuery {
    url: String,
}

async fn website_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WebsiteInfoQuery>,
) -> Result<Json<WebsiteBookmark>, ApiError> {
    Ok(Json(state.websites.preview(&query.url).await?))
}

/// Boundary error: everything a handler can fail with, mapped to a status
/// code and a JSON body.
#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    Gateway(GatewayError),
    Link(LinkError),
    Website(WebsiteError),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self::Gateway(e)
    }
}

impl From<LinkError> for ApiError {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

impl From<WebsiteError> for ApiError {
    fn from(e: WebsiteError) -> Self {
        Self::Website(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::TooManyRequests) => StatusCode::TOO_MANY_REQUESTS,
            Self::Auth(AuthError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Gateway(e) | Self::Link(LinkError::Gateway(e)) => match e {
                GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
                GatewayError::RuntimeUnavailable(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Link(LinkError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Website(WebsiteError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Website(WebsiteError::Fetch(_)) => StatusCode::BAD_GATEWAY,
            Self::Website(WebsiteError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Auth(e) => e.to_string(),
            Self::Gateway(e) => e.to_string(),
            Self::Link(e) => e.to_string(),
            Self::Website(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.message());
        }
        let body = json!({
            "error": self.message(),
            "details": format!("{:?}", self),
        });
        (status, Json(body)).into_response()
    }
}
