pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod form;
pub mod list;
pub mod pagination;
pub mod session;
pub mod toast;
pub mod types;

pub use client::{ApiError, HttpTicketApi, ListQuery, TicketApi};
pub use config::Config;
pub use debounce::Debouncer;
pub use error::{Result, TesseraError};
pub use form::{
    AuthorSource, EditState, MessageEditor, RequesterMode, TicketForm, TicketFormFields,
    generate_ticket_id,
};
pub use list::{FetchStamp, SearchInput, TicketList};
pub use pagination::{PAGE_SIZES, PAGE_WINDOW, Pager, page_window, total_pages};
pub use session::{CurrentUser, Session};
pub use toast::{Toast, ToastLevel};
pub use types::{
    Requester, Ticket, TicketMessage, TicketPage, TicketStatus, TicketType, User, VALID_STATUSES,
    VALID_TYPES,
};
