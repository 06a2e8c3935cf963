//! State shared by every dashboard panel.

use std::cell::Cell;
use std::fmt::Display;

/// Lifecycle of a panel's fetched data
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    /// Success with the data, or Error with the message. Nothing partial is kept.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T: Clone + Default> FetchState<T> {
    /// The data, or the empty value while loading or after a failure.
    pub fn data_or_default(&self) -> T {
        self.data().cloned().unwrap_or_default()
    }
}

/// Outcome text shown next to a form after save/add. Not auto-dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Failure(String),
}

impl FormMessage {
    pub fn text(&self) -> &str {
        match self {
            FormMessage::Success(text) | FormMessage::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormMessage::Success(_))
    }

    /// `success` on Ok, `"{failure_prefix}: {error}"` on Err.
    pub fn from_result<T, E: Display>(result: &Result<T, E>, success: &str, failure_prefix: &str) -> Self {
        match result {
            Ok(_) => FormMessage::Success(success.to_string()),
            Err(err) => FormMessage::Failure(format!("{}: {}", failure_prefix, err)),
        }
    }
}

/// Issues tickets for in-flight fetches so that only the most recently
/// dispatched one may write panel state.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: Cell<u64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, invalidating all earlier tickets.
    pub fn begin(&self) -> u64 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_keeps_only_message_on_error() {
        let state: FetchState<Vec<u32>> = FetchState::from_result(Err::<Vec<u32>, _>("network error"));
        assert!(state.is_error());
        assert_eq!(state.error(), Some("network error"));
        assert_eq!(state.data_or_default(), Vec::<u32>::new());
    }

    #[test]
    fn test_form_message() {
        let ok: Result<(), String> = Ok(());
        let msg = FormMessage::from_result(&ok, "Saved", "Failed to save");
        assert!(msg.is_success());
        assert_eq!(msg.text(), "Saved");

        let err: Result<(), String> = Err("timeout".to_string());
        let msg = FormMessage::from_result(&err, "Saved", "Failed to save");
        assert_eq!(msg, FormMessage::Failure("Failed to save: timeout".to_string()));
    }

    #[test]
    fn test_stale_ticket_is_not_current() {
        let generation = RequestGeneration::new();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
