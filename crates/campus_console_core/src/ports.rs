//! crates/campus_console_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the console's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to stay independent of the concrete REST transport that implements them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Credentials, Page, PageRequest, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error taxonomy every port operation resolves to. The core never
/// interprets HTTP status codes beyond these three kinds.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the payload; the message is suitable for inline display.
    #[error("{0}")]
    Validation(String),
    /// No active session. Routed through `SessionStore`, never shown per-screen.
    #[error("Your session has ended. Please sign in again.")]
    Unauthorized,
    /// Network or server failure with no actionable field-level detail.
    #[error("The server could not be reached: {0}")]
    Transport(String),
}

/// A convenience type alias for `Result<T, ApiError>`.
pub type ApiResult<T> = Result<T, ApiError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Retrieval and mutation of one managed collection. Every management screen
/// consumes this identically regardless of the entity behind it.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Send;
    type Payload: Send + Sync;

    /// Fetches one page of the filtered collection, in server order.
    async fn fetch_page(&self, request: PageRequest) -> ApiResult<Page<Self::Item>>;

    /// Runs an instant free-text search. The result set is unpaginated;
    /// the server decides whether and where to cap it.
    async fn search(&self, query: &str) -> ApiResult<Vec<Self::Item>>;

    async fn create(&self, payload: &Self::Payload) -> ApiResult<Self::Item>;

    async fn update(&self, id: Uuid, payload: &Self::Payload) -> ApiResult<Self::Item>;

    async fn remove(&self, id: Uuid) -> ApiResult<()>;
}

/// Authentication operations backing `SessionStore`.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolves the identity attached to the current session, if any.
    async fn current_identity(&self) -> ApiResult<User>;

    async fn login(&self, credentials: &Credentials) -> ApiResult<User>;

    async fn logout(&self) -> ApiResult<()>;
}
