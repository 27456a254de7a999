//! Draft validation.
//!
//! Every rule is evaluated on every submit attempt; checks do not
//! short-circuit, so all applicable errors surface at once. Prior errors
//! are cleared before re-checking.

use super::fields::TicketFormFields;

pub const ERR_TICKET_TYPE_REQUIRED: &str = "Ticket type is required";
pub const ERR_CUSTOMER_ID_REQUIRED: &str = "Customer ID is required";
pub const ERR_USER_REQUIRED: &str = "User is required";
pub const ERR_NO_MESSAGES: &str = "At least one message must be added to create a ticket";
pub const ERR_MESSAGE_REQUIRED: &str = "Message is required";
pub const ERR_COMMENT_BY_REQUIRED: &str = "Comment by is required";

/// How the form collects the requester, which decides the error wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequesterMode {
    /// Raw customer identifier typed or picked from a fixed list
    CustomerId,
    /// Picked from the user directory (canonical flow)
    #[default]
    User,
}

/// Result of a full-form validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidity {
    pub is_valid: bool,
    /// Error not attached to any single field (the empty-thread error)
    pub general_error: Option<&'static str>,
}

/// Validate the whole draft, writing field errors in place.
pub fn validate_form(
    fields: &mut TicketFormFields,
    message_count: usize,
    mode: RequesterMode,
) -> FormValidity {
    let mut is_valid = true;
    let mut general_error = None;
    fields.clear_errors();

    if fields.ticket_type.value.is_none() {
        fields.ticket_type.set_error(ERR_TICKET_TYPE_REQUIRED);
        is_valid = false;
    }

    if fields.requester.value.is_none() {
        let message = match mode {
            RequesterMode::CustomerId => ERR_CUSTOMER_ID_REQUIRED,
            RequesterMode::User => ERR_USER_REQUIRED,
        };
        fields.requester.set_error(message);
        is_valid = false;
    }

    if message_count == 0 {
        general_error = Some(ERR_NO_MESSAGES);
        is_valid = false;
    }

    FormValidity {
        is_valid,
        general_error,
    }
}

/// Errors from validating one message row before add/update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEntryErrors {
    pub message: Option<&'static str>,
    pub comment_by: Option<&'static str>,
}

impl MessageEntryErrors {
    pub fn is_valid(&self) -> bool {
        self.message.is_none() && self.comment_by.is_none()
    }
}

/// Validate a single message entry.
///
/// `author` is `Some` only when the author is typed manually; variants
/// that attribute messages to the logged-in session skip that check.
pub fn validate_message_entry(text: &str, author: Option<&str>) -> MessageEntryErrors {
    let mut errors = MessageEntryErrors::default();

    if text.trim().is_empty() {
        errors.message = Some(ERR_MESSAGE_REQUIRED);
    }

    if let Some(author) = author
        && author.trim().is_empty()
    {
        errors.comment_by = Some(ERR_COMMENT_BY_REQUIRED);
    }

    errors
}
