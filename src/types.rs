use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TesseraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::InProgress => write!(f, "in_progress"),
            TicketStatus::Resolved => write!(f, "resolved"),
            TicketStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(TesseraError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["open", "in_progress", "resolved", "closed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TicketType {
    #[serde(rename = "support/billing")]
    Billing,
    #[serde(rename = "support/technical")]
    Technical,
    #[default]
    #[serde(rename = "support/general")]
    General,
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketType::Billing => write!(f, "support/billing"),
            TicketType::Technical => write!(f, "support/technical"),
            TicketType::General => write!(f, "support/general"),
        }
    }
}

impl FromStr for TicketType {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "support/billing" | "billing" => Ok(TicketType::Billing),
            "support/technical" | "technical" => Ok(TicketType::Technical),
            "support/general" | "general" => Ok(TicketType::General),
            _ => Err(TesseraError::InvalidType(s.to_string())),
        }
    }
}

pub const VALID_TYPES: &[&str] = &["support/billing", "support/technical", "support/general"];

/// An entry in the user directory, as returned by the user lookup API.
///
/// Records known only by id (a bare `userId` string on the wire) carry
/// empty `full_name`/`email` until resolved against the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "fullName", default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn is_resolved(&self) -> bool {
        !self.full_name.is_empty()
    }
}

/// Who opened the ticket.
///
/// The wire format admits two shapes: a raw `customerId` string on older
/// records, and a `userId` reference (bare id string or embedded user
/// object) on current ones. Normalization happens here so the rest of the
/// crate never inspects wire fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requester {
    /// Raw customer identifier string
    ById(String),
    /// Reference into the user directory
    Resolved(User),
}

impl Requester {
    /// Identifier to submit with the ticket payload
    pub fn id(&self) -> &str {
        match self {
            Requester::ById(id) => id,
            Requester::Resolved(user) => &user.id,
        }
    }

    /// Name to show in list rows; falls back to the raw id
    pub fn display_name(&self) -> &str {
        match self {
            Requester::ById(id) => id,
            Requester::Resolved(user) => {
                if user.full_name.is_empty() {
                    &user.id
                } else {
                    &user.full_name
                }
            }
        }
    }
}

/// One comment entry within a ticket's thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub comments: String,

    pub comment_by: String,
}

impl TicketMessage {
    pub fn new(comments: impl Into<String>, comment_by: impl Into<String>) -> Self {
        Self {
            id: None,
            comments: comments.into(),
            comment_by: comment_by.into(),
        }
    }
}

/// A support ticket as held by the remote store.
///
/// `id` is the server-assigned record id (`_id`); `ticket_id` is the
/// user-facing 6-digit identifier assigned at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TicketWire", into = "TicketWire")]
pub struct Ticket {
    pub id: Option<String>,
    pub ticket_id: String,
    pub ticket_type: TicketType,
    pub requester: Requester,
    pub messages: Vec<TicketMessage>,
    pub ticket_status: TicketStatus,
}

impl Ticket {
    /// First message of the thread, shown as the row preview
    pub fn preview(&self) -> Option<&TicketMessage> {
        self.messages.first()
    }
}

/// Raw wire shape of a ticket. Exactly one of `customer_id` / `user_id`
/// is expected; `user_id` may be a bare id string or an embedded user.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketWire {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    ticket_id: String,

    ticket_type: TicketType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserRef>,

    #[serde(default)]
    messages: Vec<TicketMessage>,

    ticket_status: TicketStatus,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum UserRef {
    Id(String),
    Embedded(User),
}

impl TryFrom<TicketWire> for Ticket {
    type Error = String;

    fn try_from(wire: TicketWire) -> Result<Self, Self::Error> {
        let requester = match (wire.customer_id, wire.user_id) {
            (Some(customer_id), None) => Requester::ById(customer_id),
            (None, Some(UserRef::Embedded(user))) => Requester::Resolved(user),
            (None, Some(UserRef::Id(id))) => Requester::Resolved(User {
                id,
                ..User::default()
            }),
            (None, None) => {
                return Err(format!(
                    "ticket '{}' has neither customerId nor userId",
                    wire.ticket_id
                ));
            }
            (Some(_), Some(_)) => {
                return Err(format!(
                    "ticket '{}' has both customerId and userId",
                    wire.ticket_id
                ));
            }
        };

        Ok(Ticket {
            id: wire.id,
            ticket_id: wire.ticket_id,
            ticket_type: wire.ticket_type,
            requester,
            messages: wire.messages,
            ticket_status: wire.ticket_status,
        })
    }
}

impl From<Ticket> for TicketWire {
    fn from(ticket: Ticket) -> Self {
        let (customer_id, user_id) = match ticket.requester {
            Requester::ById(id) => (Some(id), None),
            // Submissions reference the user by id; the server resolves it
            Requester::Resolved(user) => (None, Some(UserRef::Id(user.id))),
        };

        TicketWire {
            id: ticket.id,
            ticket_id: ticket.ticket_id,
            ticket_type: ticket.ticket_type,
            customer_id,
            user_id,
            messages: ticket.messages,
            ticket_status: ticket.ticket_status,
        }
    }
}

/// One page of tickets plus the total count across all pages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPage {
    #[serde(default)]
    pub tickets: Vec<Ticket>,

    #[serde(default)]
    pub total: u64,
}
