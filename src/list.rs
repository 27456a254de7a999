//! Ticket list controller.
//!
//! Holds the current page of tickets plus pagination, search, loading and
//! delete-confirmation state, and mediates between the form controller and
//! the remote service. Fetches are stamped with a generation counter:
//! requests are not cancellable once issued, so a response is applied only
//! if no newer fetch has been started since it left. Stale responses are
//! discarded instead of racing the newer state.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::{ListQuery, TicketApi};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::TesseraError;
use crate::form::TicketForm;
use crate::pagination::Pager;
use crate::toast::Toast;
use crate::types::{Ticket, TicketPage, User};

/// Prefer the server-provided message, fall back to a generic one
fn toast_message(error: &TesseraError, fallback: &str) -> String {
    match error {
        TesseraError::Api(message) if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Identity of one in-flight fetch: its generation stamp plus a snapshot
/// of the parameters it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchStamp {
    seq: u64,
    page: u32,
    limit: u32,
    search: String,
}

pub struct TicketList {
    api: Arc<dyn TicketApi>,
    tickets: Vec<Ticket>,
    pager: Pager,
    search_text: String,
    loading: bool,
    toast: Option<Toast>,
    pending_delete: Option<String>,
    editing_record_id: Option<String>,
    fetch_seq: u64,
}

impl TicketList {
    pub fn new(api: Arc<dyn TicketApi>, config: &Config) -> Self {
        Self {
            api,
            tickets: Vec::new(),
            pager: Pager::new(config.default_limit),
            search_text: String::new(),
            loading: false,
            toast: None,
            pending_delete: None,
            editing_record_id: None,
            fetch_seq: 0,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Hand the current toast to the view for display
    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    // --- fetching ---------------------------------------------------------

    /// Start a fetch: bump the generation, raise the loading flag, and
    /// snapshot the parameters the request will be issued with.
    pub fn begin_fetch(&mut self) -> FetchStamp {
        self.fetch_seq += 1;
        self.loading = true;
        FetchStamp {
            seq: self.fetch_seq,
            page: self.pager.page(),
            limit: self.pager.limit(),
            search: self.search_text.clone(),
        }
    }

    /// Issue the request for a stamp. Non-empty search text routes to the
    /// search endpoint, otherwise the plain list endpoint.
    pub async fn run_fetch(&self, stamp: &FetchStamp) -> crate::error::Result<TicketPage> {
        if stamp.search.is_empty() {
            self.api
                .list_tickets(&ListQuery::new(stamp.page, stamp.limit))
                .await
        } else {
            self.api
                .search_tickets(&stamp.search, stamp.page, stamp.limit)
                .await
        }
    }

    /// Apply a finished fetch, unless a newer one has been issued since.
    pub fn apply_fetch(&mut self, stamp: FetchStamp, result: crate::error::Result<TicketPage>) {
        if stamp.seq != self.fetch_seq {
            tracing::debug!("discarding stale ticket fetch (stamp {})", stamp.seq);
            return;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.tickets = page.tickets;
                self.pager.set_total_items(page.total);
            }
            Err(error) => {
                tracing::warn!("ticket fetch failed: {error}");
                self.toast = Some(Toast::error(toast_message(
                    &error,
                    "Failed to fetch tickets",
                )));
            }
        }
    }

    /// Fetch the current page sequentially: begin, run, apply
    pub async fn refresh(&mut self) {
        let stamp = self.begin_fetch();
        let result = self.run_fetch(&stamp).await;
        self.apply_fetch(stamp, result);
    }

    // --- navigation -------------------------------------------------------

    pub async fn go_to_page(&mut self, page: u32) {
        self.pager.set_page(page);
        self.refresh().await;
    }

    /// Change the page size; always lands back on page 1
    pub async fn change_limit(&mut self, limit: u32) {
        self.pager.set_limit(limit);
        self.refresh().await;
    }

    /// Apply a (debounce-committed) search query; resets to page 1
    pub async fn apply_search(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
        self.pager.set_page(1);
        self.refresh().await;
    }

    // --- create / edit ----------------------------------------------------

    /// Open the form for a fresh ticket
    pub fn begin_create(&mut self, form: &mut TicketForm) {
        self.editing_record_id = None;
        form.open_for_create();
    }

    /// Open the form seeded from an existing row, remembering its record
    /// id so the save dispatches to update rather than create
    pub fn begin_edit(&mut self, form: &mut TicketForm, ticket: &Ticket) {
        self.editing_record_id = ticket.id.clone();
        form.open_for_edit(ticket);
    }

    /// Persist a submitted draft: update when a record id was captured at
    /// edit time, create otherwise. On success the current page is
    /// refetched rather than patched locally, so totals and ordering stay
    /// consistent with the server.
    pub async fn submit_draft(&mut self, draft: Ticket) -> bool {
        let (result, saved_message) = match self.editing_record_id.take() {
            Some(record_id) => (
                self.api.update_ticket(&record_id, &draft).await,
                "Ticket updated successfully",
            ),
            None => (
                self.api.create_ticket(&draft).await,
                "Ticket created successfully",
            ),
        };

        match result {
            Ok(_) => {
                self.toast = Some(Toast::success(saved_message));
                self.refresh().await;
                true
            }
            Err(error) => {
                tracing::warn!("ticket save failed: {error}");
                self.toast = Some(Toast::error(toast_message(&error, "Failed to save ticket")));
                false
            }
        }
    }

    // --- delete -----------------------------------------------------------

    /// First click: remember the target and ask the view to confirm
    pub fn request_delete(&mut self, record_id: impl Into<String>) {
        self.pending_delete = Some(record_id.into());
    }

    /// Dismissing the confirmation issues nothing
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Confirmed delete: call the service, then drop the row from local
    /// state directly, without a refetch. Prior state is untouched on
    /// failure.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(record_id) = self.pending_delete.take() else {
            return false;
        };

        match self.api.delete_ticket(&record_id).await {
            Ok(()) => {
                self.tickets
                    .retain(|ticket| ticket.id.as_deref() != Some(record_id.as_str()));
                self.toast = Some(Toast::success("Ticket deleted successfully"));
                true
            }
            Err(error) => {
                tracing::warn!("ticket delete failed: {error}");
                self.toast = Some(Toast::error(toast_message(
                    &error,
                    "Failed to delete ticket",
                )));
                false
            }
        }
    }

    // --- user directory ---------------------------------------------------

    /// Options for the form's requester picker. Lookup failures degrade to
    /// an empty list; the form stays usable.
    pub async fn fetch_user_options(&self) -> Vec<User> {
        match self.api.search_users(1, 10).await {
            Ok(users) => users,
            Err(error) => {
                tracing::warn!("user lookup failed: {error}");
                Vec::new()
            }
        }
    }
}

/// Search input controller: buffers keystrokes and commits the query only
/// after the quiescent interval, collapsing a burst of keystrokes into one
/// fetch. Owns its debounce timer; `teardown` (or drop) cancels any
/// pending commit when the view unmounts.
pub struct SearchInput {
    text: String,
    debouncer: Debouncer,
    tx: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Returns the controller plus the receiving end of committed queries;
    /// the host forwards each received query to [`TicketList::apply_search`].
    pub fn new(debounce_ms: u64) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                text: String::new(),
                debouncer: Debouncer::from_millis(debounce_ms),
                tx,
            },
            rx,
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// One keystroke: update the buffer and (re)start the quiescence timer
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let tx = self.tx.clone();
        let query = self.text.clone();
        self.debouncer.call(move || {
            let _ = tx.send(query);
        });
    }

    /// The clear button: empties the buffer and commits immediately
    pub fn clear(&mut self) {
        self.text.clear();
        self.debouncer.cancel();
        let _ = self.tx.send(String::new());
    }

    /// Cancel any pending commit; called on component teardown
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_message_prefers_server_message() {
        let error = TesseraError::Api("ticket is locked".to_string());
        assert_eq!(
            toast_message(&error, "Failed to save ticket"),
            "ticket is locked"
        );
    }

    #[test]
    fn test_toast_message_falls_back_for_transport_errors() {
        let error = TesseraError::Other("connection refused".to_string());
        assert_eq!(
            toast_message(&error, "Failed to fetch tickets"),
            "Failed to fetch tickets"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_commits_once_per_burst() {
        let (mut input, mut rx) = SearchInput::new(300);

        input.on_input("p");
        input.on_input("pr");
        input.on_input("printer");
        tokio::time::sleep(std::time::Duration::from_millis(400)).await;

        assert_eq!(rx.try_recv().as_deref(), Ok("printer"));
        assert!(rx.try_recv().is_err());
        assert_eq!(input.text(), "printer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_teardown_cancels_pending_commit() {
        let (mut input, mut rx) = SearchInput::new(300);

        input.on_input("half-typ");
        input.teardown();
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_clear_commits_immediately() {
        let (mut input, mut rx) = SearchInput::new(300);

        input.on_input("printer");
        input.clear();

        assert_eq!(rx.try_recv().as_deref(), Ok(""));
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        // The pending "printer" commit was cancelled by the clear
        assert!(rx.try_recv().is_err());
    }
}
