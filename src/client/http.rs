//! Reqwest-backed implementation of [`TicketApi`].
//!
//! The session token is only ever exposed at header-build time, wrapped in
//! `RedactedHeader` so the value cannot leak through request logging even
//! when `RUST_LOG=reqwest=debug` is enabled.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config::Config;
use crate::error::{Result, TesseraError};
use crate::session::Session;
use crate::types::{Ticket, TicketMessage, TicketPage, User};

use super::{ApiError, ListQuery, TicketApi, TicketPageEnvelope, UserSearchResponse};

/// Wrapper for sensitive header values that redacts the value when formatted
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        header::HeaderValue::from_str(&self.value)
            .map_err(|_| TesseraError::Session("session token is not a valid header".to_string()))
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Error body shape the backend uses for failed calls
#[derive(Deserialize)]
struct ServerError {
    message: Option<String>,
    error: Option<String>,
}

pub struct HttpTicketApi {
    client: Client,
    base: Url,
    user_api: Option<Url>,
    session: Option<Session>,
}

impl HttpTicketApi {
    /// Build a client from configuration and an optional session.
    ///
    /// Configures the HTTP client with 10s connect timeout and 30s total
    /// timeout. The session is required only for the user directory lookup.
    pub fn new(config: &Config, session: Option<Session>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let base = Url::parse(&config.ticket_api_url())?;
        let user_api = match config.user_api_url() {
            Some(url) => Some(Url::parse(&url)?),
            None => None,
        };

        Ok(Self {
            client,
            base,
            user_api,
            session,
        })
    }

    /// `{base}/{segment}` regardless of whether the base ends with a slash
    fn item_url(&self, segment: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TesseraError::Config("ticket API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Map a non-success response to an [`ApiError`], preferring the
    /// server-provided message over the generic status line.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let fallback = format!("HTTP {status}");
        let message = response
            .json::<ServerError>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or(fallback);

        Err(ApiError::with_status(message, status).into())
    }
}

#[async_trait]
impl TicketApi for HttpTicketApi {
    async fn list_tickets(&self, query: &ListQuery) -> Result<TicketPage> {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(status) = query.status {
                pairs.append_pair("status", &status.to_string());
            }
            if let Some(ticket_type) = query.ticket_type {
                pairs.append_pair("type", &ticket_type.to_string());
            }
        }

        tracing::debug!("listing tickets: page {} limit {}", query.page, query.limit);
        let response = Self::check(self.client.get(url).send().await?).await?;
        let envelope: TicketPageEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn search_tickets(
        &self,
        search_text: &str,
        page: u32,
        limit: u32,
    ) -> Result<TicketPage> {
        let mut url = self.item_url("search")?;
        url.query_pairs_mut()
            .append_pair("searchText", search_text)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        tracing::debug!("searching tickets: '{search_text}' page {page}");
        let response = Self::check(self.client.get(url).send().await?).await?;
        let envelope: TicketPageEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn get_ticket(&self, id: &str) -> Result<Ticket> {
        let url = self.item_url(id)?;
        let response = Self::check(self.client.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create_ticket(&self, ticket: &Ticket) -> Result<Ticket> {
        let response = self.client.post(self.base.clone()).json(ticket).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn update_ticket(&self, id: &str, ticket: &Ticket) -> Result<Ticket> {
        let url = self.item_url(id)?;
        let response = Self::check(self.client.put(url).json(ticket).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn delete_ticket(&self, id: &str) -> Result<()> {
        let url = self.item_url(id)?;
        Self::check(self.client.delete(url).send().await?).await?;
        Ok(())
    }

    async fn add_message(&self, ticket_id: &str, message: &TicketMessage) -> Result<Ticket> {
        let url = self.item_url(ticket_id)?;
        let body = json!({ "messages": [message] });
        let response = Self::check(self.client.put(url).json(&body).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn search_users(&self, page: u32, limit: u32) -> Result<Vec<User>> {
        let url = self
            .user_api
            .clone()
            .ok_or_else(|| TesseraError::Config("user API URL is not configured".to_string()))?;

        let session = self
            .session
            .as_ref()
            .ok_or_else(|| TesseraError::Session("user lookup requires a session".to_string()))?;

        let api_key = RedactedHeader::new(session.expose_token());
        let body = json!({ "page": page, "limit": limit, "search": {} });

        let response = self
            .client
            .post(url)
            .header("X-API-Key", api_key.as_header_value()?)
            .header(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            )
            .json(&body)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let result: UserSearchResponse = response.json().await?;
        if !result.success {
            return Err(TesseraError::Api("user lookup failed".to_string()));
        }

        Ok(result.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpTicketApi {
        let config = Config {
            ticket_api_url: base.to_string(),
            ..Config::default()
        };
        HttpTicketApi::new(&config, None).unwrap()
    }

    #[test]
    fn test_item_url_appends_segment() {
        let api = api("http://localhost:3000/tickets");
        assert_eq!(
            api.item_url("abc123").unwrap().as_str(),
            "http://localhost:3000/tickets/abc123"
        );
        assert_eq!(
            api.item_url("search").unwrap().as_str(),
            "http://localhost:3000/tickets/search"
        );
    }

    #[test]
    fn test_item_url_tolerates_trailing_slash() {
        let api = api("http://localhost:3000/tickets/");
        assert_eq!(
            api.item_url("abc123").unwrap().as_str(),
            "http://localhost:3000/tickets/abc123"
        );
    }

    #[test]
    fn test_redacted_header_formats_as_redacted() {
        let header = RedactedHeader::new("tok-123");
        assert_eq!(format!("{header}"), "[REDACTED]");
        assert!(!format!("{header:?}").contains("tok-123"));
        assert_eq!(header.as_header_value().unwrap().to_str().unwrap(), "tok-123");
    }
}
