//! Draft ticket fields.
//!
//! Each input is a value/error pair: editing a field always clears its
//! error, and validation recomputes errors from scratch, so a stale error
//! never outlives a fix.

use crate::types::{Requester, Ticket, TicketStatus, TicketType};

/// A form input value paired with its validation error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field<T> {
    pub value: T,
    error: Option<String>,
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Self { value, error: None }
    }

    /// Update the value; any prior error is cleared by the edit
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The draft ticket being created or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFormFields {
    /// Existing 6-digit id when editing; empty for a fresh draft
    pub ticket_id: String,
    pub ticket_type: Field<Option<TicketType>>,
    pub requester: Field<Option<Requester>>,
    pub ticket_status: Field<TicketStatus>,
}

impl TicketFormFields {
    /// Fresh draft: everything empty, status defaulted to open
    pub fn empty() -> Self {
        Self {
            ticket_id: String::new(),
            ticket_type: Field::new(None),
            requester: Field::new(None),
            ticket_status: Field::new(TicketStatus::Open),
        }
    }

    /// Seed the draft from an existing ticket for editing.
    ///
    /// The requester comes over as-is; an embedded user object stays
    /// resolved, a bare id stays a bare id.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id.clone(),
            ticket_type: Field::new(Some(ticket.ticket_type)),
            requester: Field::new(Some(ticket.requester.clone())),
            ticket_status: Field::new(ticket.ticket_status),
        }
    }

    /// Drop every field error without touching values
    pub fn clear_errors(&mut self) {
        self.ticket_type.clear_error();
        self.requester.clear_error();
        self.ticket_status.clear_error();
    }
}
