//! Ticket form controller.
//!
//! Owns the draft fields and the message editor for one create-or-edit
//! interaction. The controller validates, assembles the final payload and
//! hands it back to the caller; turning that payload into a create or
//! update call (and surfacing the outcome) is the list controller's job.

use rand::Rng;

use crate::session::Session;
use crate::types::{Requester, Ticket, TicketStatus, TicketType};

use super::fields::TicketFormFields;
use super::messages::{AuthorSource, MessageEditor};
use super::validate::{FormValidity, RequesterMode, validate_form};

/// Generate a user-facing ticket id: 6 decimal digits, never
/// zero-padded, uniform over [100000, 999999].
pub fn generate_ticket_id() -> String {
    rand::rng().random_range(100_000..=999_999u32).to_string()
}

#[derive(Debug, Clone)]
pub struct TicketForm {
    fields: TicketFormFields,
    editor: MessageEditor,
    requester_mode: RequesterMode,
    general_error: Option<&'static str>,
    editing: bool,
}

impl TicketForm {
    /// Canonical flow: requester picked from the user directory, message
    /// authorship attributed to the injected session's user.
    pub fn for_session(session: &Session) -> Self {
        Self::new(
            RequesterMode::User,
            AuthorSource::Session(session.user.full_name.clone()),
        )
    }

    /// Legacy flow: raw customer id plus a typed "Comment by" input
    pub fn with_manual_author() -> Self {
        Self::new(RequesterMode::CustomerId, AuthorSource::Manual)
    }

    pub fn new(requester_mode: RequesterMode, author_source: AuthorSource) -> Self {
        Self {
            fields: TicketFormFields::empty(),
            editor: MessageEditor::new(author_source),
            requester_mode,
            general_error: None,
            editing: false,
        }
    }

    pub fn fields(&self) -> &TicketFormFields {
        &self.fields
    }

    pub fn editor(&self) -> &MessageEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut MessageEditor {
        &mut self.editor
    }

    pub fn general_error(&self) -> Option<&'static str> {
        self.general_error
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Open a fresh draft: empty fields, status defaulted to open
    pub fn open_for_create(&mut self) {
        self.reset();
    }

    /// Open an existing ticket for editing, seeding fields and thread
    pub fn open_for_edit(&mut self, ticket: &Ticket) {
        self.fields = TicketFormFields::from_ticket(ticket);
        self.editor.seed(ticket.messages.to_vec());
        self.general_error = None;
        self.editing = true;
    }

    pub fn set_ticket_type(&mut self, ticket_type: Option<TicketType>) {
        self.fields.ticket_type.set(ticket_type);
    }

    pub fn set_requester(&mut self, requester: Option<Requester>) {
        self.fields.requester.set(requester);
    }

    pub fn set_status(&mut self, status: TicketStatus) {
        self.fields.ticket_status.set(status);
    }

    /// Run full validation, leaving errors on the fields for the view
    pub fn validate(&mut self) -> FormValidity {
        let validity = validate_form(
            &mut self.fields,
            self.editor.messages().len(),
            self.requester_mode,
        );
        self.general_error = validity.general_error;
        validity
    }

    /// Validate and assemble the final payload.
    ///
    /// On failure returns `None` and leaves the errors visible for
    /// correction. On success the draft is reset; the returned ticket
    /// carries a freshly generated id for creates and the existing id for
    /// edits.
    pub fn submit(&mut self) -> Option<Ticket> {
        if !self.validate().is_valid {
            return None;
        }

        let ticket_id = if self.editing && !self.fields.ticket_id.is_empty() {
            self.fields.ticket_id.clone()
        } else {
            generate_ticket_id()
        };

        // Validation guarantees both fields are present
        let ticket_type = self.fields.ticket_type.value?;
        let requester = self.fields.requester.value.clone()?;

        let ticket = Ticket {
            id: None,
            ticket_id,
            ticket_type,
            requester,
            messages: self.editor.take_messages(),
            ticket_status: self.fields.ticket_status.value,
        };

        self.reset();
        Some(ticket)
    }

    /// Discard all unsaved edits; the parent closes the view
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.fields = TicketFormFields::empty();
        self.editor.clear();
        self.general_error = None;
        self.editing = false;
    }
}
