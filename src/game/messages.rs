//! # Message Log
//!
//! User-facing narration of what happened this session. Repeated messages are
//! stacked into one entry with a count instead of flooding the log.

use crate::game::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
    pub count: u32,
}

impl Message {
    pub fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
            count: 1,
        }
    }

    /// Text including the repeat counter, e.g. `"Nothing to attack. (x3)"`.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, or bumps the count of the last one if the text matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::{MessageLog, Rgb};
    ///
    /// let mut log = MessageLog::new();
    /// log.add_message("The orc attacks.", Rgb(255, 192, 192));
    /// log.add_message("The orc attacks.", Rgb(255, 192, 192));
    /// assert_eq!(log.messages().len(), 1);
    /// assert_eq!(log.messages()[0].full_text(), "The orc attacks. (x2)");
    /// ```
    pub fn add_message(&mut self, text: impl Into<String>, color: Rgb) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut() {
            if last.text == text {
                last.count += 1;
                return;
            }
        }
        self.messages.push(Message::new(text, color));
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The `count` most recent messages, oldest first.
    pub fn recent(&self, count: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
