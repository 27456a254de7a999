//! Ticket service client.
//!
//! [`TicketApi`] is the seam between the UI controllers and the remote
//! store: the reqwest-backed [`HttpTicketApi`] implements it in
//! production, and tests substitute in-memory fakes. Controllers hold an
//! `Arc<dyn TicketApi>` and never see HTTP details.

pub mod http;

pub use http::HttpTicketApi;

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use crate::error::{Result, TesseraError};
use crate::types::{Ticket, TicketMessage, TicketPage, TicketStatus, TicketType, User};

/// Query parameters for the plain (non-search) list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    /// Optional server-side status filter
    pub status: Option<TicketStatus>,
    /// Optional server-side type filter
    pub ticket_type: Option<TicketType>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            status: None,
            ticket_type: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, ticket_type: TicketType) -> Self {
        self.ticket_type = Some(ticket_type);
        self
    }
}

/// Envelope wrapping paginated ticket responses
#[derive(Debug, Deserialize)]
pub(crate) struct TicketPageEnvelope {
    pub data: TicketPage,
}

/// Response of the user directory lookup
#[derive(Debug, Deserialize)]
pub(crate) struct UserSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<User>,
}

/// Remote ticket store operations
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// `GET {base}?page&limit[&status][&type]`
    async fn list_tickets(&self, query: &ListQuery) -> Result<TicketPage>;

    /// `GET {base}/search?searchText&page&limit`
    async fn search_tickets(
        &self,
        search_text: &str,
        page: u32,
        limit: u32,
    ) -> Result<TicketPage>;

    /// `GET {base}/{id}`
    async fn get_ticket(&self, id: &str) -> Result<Ticket>;

    /// `POST {base}` with the ticket sans record id
    async fn create_ticket(&self, ticket: &Ticket) -> Result<Ticket>;

    /// `PUT {base}/{id}`
    async fn update_ticket(&self, id: &str, ticket: &Ticket) -> Result<Ticket>;

    /// `DELETE {base}/{id}`
    async fn delete_ticket(&self, id: &str) -> Result<()>;

    /// `PUT {base}/{id}` appending one message to the thread
    async fn add_message(&self, ticket_id: &str, message: &TicketMessage) -> Result<Ticket>;

    /// `POST {userApiBase}` with `{ page, limit, search }` and `X-API-Key`
    async fn search_users(&self, page: u32, limit: u32) -> Result<Vec<User>>;
}

/// API-level error preserving the HTTP status before conversion.
///
/// The message is the server-provided one when the error body carried it,
/// otherwise a generic `HTTP <status>` fallback.
#[derive(Debug)]
pub struct ApiError {
    pub status: Option<reqwest::StatusCode>,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(message: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(reqwest::StatusCode::NOT_FOUND)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for TesseraError {
    fn from(error: ApiError) -> Self {
        TesseraError::Api(error.message)
    }
}
