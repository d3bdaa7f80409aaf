//! # Message Log
//!
//! Player-facing text produced by the turn pipeline, shown by the renderer.

use crate::config::MAX_MESSAGES;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An ordered, bounded history of messages. The newest entry is last.
///
/// # Examples
///
/// ```
/// use burrow::MessageLog;
///
/// let mut log = MessageLog::new();
/// log.log("spider hit you for 2 damage");
/// assert_eq!(log.latest(1).next().map(String::as_str), Some("Spider hit you for 2 damage"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message with its first letter capitalized, dropping the
    /// oldest entry once the log is full.
    pub fn log(&mut self, message: impl AsRef<str>) {
        let message = capitalize(message.as_ref());
        log::debug!("{}", message);
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Up to `count` of the newest messages, oldest first.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &String> {
        self.messages
            .iter()
            .skip(self.messages.len().saturating_sub(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_capitalized() {
        let mut log = MessageLog::new();
        log.log("you eat some of the beetle corpse");
        log.log("");
        let all: Vec<_> = log.iter().cloned().collect();
        assert_eq!(all, vec!["You eat some of the beetle corpse".to_string(), String::new()]);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = MessageLog::new();
        for i in 0..MAX_MESSAGES + 5 {
            log.log(format!("message {}", i));
        }
        assert_eq!(log.len(), MAX_MESSAGES);
        assert_eq!(log.iter().next().map(String::as_str), Some("Message 5"));
    }

    #[test]
    fn test_latest_returns_newest_in_order() {
        let mut log = MessageLog::new();
        for word in ["a", "b", "c"] {
            log.log(word);
        }
        let latest: Vec<_> = log.latest(2).map(String::as_str).collect();
        assert_eq!(latest, vec!["B", "C"]);
        assert_eq!(log.latest(10).count(), 3);
    }
}
