//! Message thread editor.
//!
//! A small state machine over the draft ticket's message list: either no
//! row is being edited (`Idle`) or exactly one existing row is loaded into
//! the input buffer (`Editing(index)`). Messages keep insertion order; no
//! operation reorders them. Indices refer to the current in-memory list,
//! so removing a row shifts everything after it.

use crate::types::TicketMessage;

use super::validate::{MessageEntryErrors, validate_message_entry};

/// Where new messages get their author attribution from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorSource {
    /// Author is typed into a "Comment by" input and validated
    Manual,
    /// Author is the logged-in user's display name
    Session(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(usize),
}

#[derive(Debug, Clone)]
pub struct MessageEditor {
    messages: Vec<TicketMessage>,
    text: String,
    author: String,
    state: EditState,
    author_source: AuthorSource,
    errors: MessageEntryErrors,
}

impl MessageEditor {
    pub fn new(author_source: AuthorSource) -> Self {
        Self {
            messages: Vec::new(),
            text: String::new(),
            author: String::new(),
            state: EditState::Idle,
            author_source,
            errors: MessageEntryErrors::default(),
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn messages(&self) -> &[TicketMessage] {
        &self.messages
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn errors(&self) -> &MessageEntryErrors {
        &self.errors
    }

    pub fn author_source(&self) -> &AuthorSource {
        &self.author_source
    }

    /// Replace the message list, e.g. when opening a ticket for editing
    pub fn seed(&mut self, messages: Vec<TicketMessage>) {
        self.messages = messages;
        self.reset_buffer();
    }

    /// Discard everything: list, buffer, edit state, errors
    pub fn clear(&mut self) {
        self.messages.clear();
        self.reset_buffer();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.errors.message = None;
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
        self.errors.comment_by = None;
    }

    /// Add the buffered entry, or commit it over the row being edited.
    ///
    /// Returns true when the entry was accepted; on failure the errors are
    /// left for the view to render and nothing changes.
    pub fn submit_entry(&mut self) -> bool {
        let manual_author = matches!(self.author_source, AuthorSource::Manual);
        self.errors =
            validate_message_entry(&self.text, manual_author.then_some(self.author.as_str()));
        if !self.errors.is_valid() {
            return false;
        }

        match self.state {
            EditState::Editing(index) => {
                let Some(message) = self.messages.get_mut(index) else {
                    // Stale edit target; drop back to idle
                    self.state = EditState::Idle;
                    return false;
                };
                // In-place update: position in the thread is preserved
                message.comments = self.text.clone();
                if manual_author {
                    message.comment_by = self.author.clone();
                }
            }
            EditState::Idle => {
                let comment_by = match &self.author_source {
                    AuthorSource::Manual => self.author.clone(),
                    AuthorSource::Session(name) => name.clone(),
                };
                self.messages
                    .push(TicketMessage::new(self.text.clone(), comment_by));
            }
        }

        self.reset_buffer();
        true
    }

    /// Load row `index` into the buffer for modification
    pub fn start_edit(&mut self, index: usize) -> bool {
        let Some(message) = self.messages.get(index) else {
            return false;
        };

        self.text = message.comments.clone();
        if matches!(self.author_source, AuthorSource::Manual) {
            self.author = message.comment_by.clone();
        }
        self.state = EditState::Editing(index);
        self.errors = MessageEntryErrors::default();
        true
    }

    /// Delete row `index`, shifting subsequent rows down by one.
    ///
    /// Deleting the row currently under edit abandons the edit; an edit of
    /// a later row keeps following the same message at its new index.
    pub fn remove(&mut self, index: usize) {
        if index >= self.messages.len() {
            return;
        }
        self.messages.remove(index);

        match self.state {
            EditState::Editing(editing) if editing == index => self.reset_buffer(),
            EditState::Editing(editing) if editing > index => {
                self.state = EditState::Editing(editing - 1);
            }
            _ => {}
        }
    }

    /// The finished thread, consumed at submit time
    pub fn take_messages(&mut self) -> Vec<TicketMessage> {
        let messages = std::mem::take(&mut self.messages);
        self.reset_buffer();
        messages
    }

    fn reset_buffer(&mut self) {
        self.text.clear();
        self.author.clear();
        self.state = EditState::Idle;
        self.errors = MessageEntryErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validate::{ERR_COMMENT_BY_REQUIRED, ERR_MESSAGE_REQUIRED};

    fn manual_editor() -> MessageEditor {
        MessageEditor::new(AuthorSource::Manual)
    }

    fn editor_with(entries: &[(&str, &str)]) -> MessageEditor {
        let mut editor = manual_editor();
        for (text, author) in entries {
            editor.set_text(*text);
            editor.set_author(*author);
            assert!(editor.submit_entry());
        }
        editor
    }

    #[test]
    fn test_add_appends_and_clears_buffer() {
        let mut editor = manual_editor();
        editor.set_text("printer down");
        editor.set_author("agent1");
        assert!(editor.submit_entry());

        assert_eq!(editor.messages().len(), 1);
        assert_eq!(editor.messages()[0].comments, "printer down");
        assert_eq!(editor.messages()[0].comment_by, "agent1");
        assert!(editor.text().is_empty());
        assert!(editor.author().is_empty());
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let mut editor = manual_editor();
        editor.set_text("  ");
        editor.set_author("");
        assert!(!editor.submit_entry());
        assert_eq!(editor.errors().message, Some(ERR_MESSAGE_REQUIRED));
        assert_eq!(editor.errors().comment_by, Some(ERR_COMMENT_BY_REQUIRED));
        assert!(editor.messages().is_empty());
    }

    #[test]
    fn test_session_author_is_attributed_automatically() {
        let mut editor = MessageEditor::new(AuthorSource::Session("Grace Hopper".to_string()));
        editor.set_text("compiler bug");
        assert!(editor.submit_entry());
        assert_eq!(editor.messages()[0].comment_by, "Grace Hopper");
    }

    #[test]
    fn test_commit_edit_updates_in_place() {
        let mut editor = editor_with(&[("first", "a"), ("second", "b"), ("third", "c")]);

        assert!(editor.start_edit(1));
        assert_eq!(editor.state(), EditState::Editing(1));
        assert_eq!(editor.text(), "second");
        assert_eq!(editor.author(), "b");

        editor.set_text("second, revised");
        assert!(editor.submit_entry());

        let comments: Vec<_> = editor.messages().iter().map(|m| m.comments.as_str()).collect();
        assert_eq!(comments, ["first", "second, revised", "third"]);
        assert_eq!(editor.state(), EditState::Idle);
    }

    #[test]
    fn test_session_commit_keeps_original_author() {
        let mut editor = MessageEditor::new(AuthorSource::Session("Grace Hopper".to_string()));
        editor.seed(vec![TicketMessage::new("original", "Ada Lovelace")]);

        assert!(editor.start_edit(0));
        editor.set_text("amended");
        assert!(editor.submit_entry());

        assert_eq!(editor.messages()[0].comments, "amended");
        assert_eq!(editor.messages()[0].comment_by, "Ada Lovelace");
    }

    #[test]
    fn test_remove_edited_row_abandons_edit() {
        let mut editor = editor_with(&[("first", "a"), ("second", "b")]);
        assert!(editor.start_edit(1));

        editor.remove(1);
        assert_eq!(editor.state(), EditState::Idle);
        assert!(editor.text().is_empty());
        assert_eq!(editor.messages().len(), 1);
    }

    #[test]
    fn test_remove_earlier_row_follows_edit_target() {
        let mut editor = editor_with(&[("first", "a"), ("second", "b"), ("third", "c")]);
        assert!(editor.start_edit(2));

        editor.remove(0);
        assert_eq!(editor.state(), EditState::Editing(1));

        editor.set_text("third, revised");
        assert!(editor.submit_entry());
        let comments: Vec<_> = editor.messages().iter().map(|m| m.comments.as_str()).collect();
        assert_eq!(comments, ["second", "third, revised"]);
    }

    #[test]
    fn test_remove_then_add_appends_at_end() {
        let mut editor = editor_with(&[("first", "a"), ("second", "b"), ("third", "c")]);

        editor.remove(1);
        editor.set_text("fourth");
        editor.set_author("d");
        assert!(editor.submit_entry());

        assert_eq!(editor.messages().len(), 3);
        let comments: Vec<_> = editor.messages().iter().map(|m| m.comments.as_str()).collect();
        assert_eq!(comments, ["first", "third", "fourth"]);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut editor = editor_with(&[("only", "a")]);
        editor.remove(5);
        assert_eq!(editor.messages().len(), 1);
    }

    #[test]
    fn test_order_is_never_rearranged() {
        let mut editor = editor_with(&[("a", "x"), ("b", "x"), ("c", "x"), ("d", "x")]);

        assert!(editor.start_edit(0));
        editor.set_text("a2");
        assert!(editor.submit_entry());
        editor.remove(2);

        let comments: Vec<_> = editor.messages().iter().map(|m| m.comments.as_str()).collect();
        assert_eq!(comments, ["a2", "b", "d"]);
    }
}
