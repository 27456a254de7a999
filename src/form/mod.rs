//! Draft ticket form: fields, validation, message editing, submission.

pub mod controller;
pub mod fields;
pub mod messages;
pub mod validate;

pub use controller::{TicketForm, generate_ticket_id};
pub use fields::{Field, TicketFormFields};
pub use messages::{AuthorSource, EditState, MessageEditor};
pub use validate::{
    FormValidity, MessageEntryErrors, RequesterMode, validate_form, validate_message_entry,
};
