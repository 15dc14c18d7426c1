//! Mail view types and provider query composition.
//!
//! List names double as match keys against the mailbox. Queries are composed
//! in the provider's own filter grammar; keys are quoted before insertion so
//! user-chosen names cannot smuggle in extra operators.

use serde::{Deserialize, Serialize};

/// Fixed page size for mailbox searches.
pub const MAIL_PAGE_SIZE: u32 = 100;

/// Fallback subject when the header is absent.
pub const NO_SUBJECT: &str = "No Subject";

/// Fallback sender when the header is absent.
pub const UNKNOWN_SENDER: &str = "Unknown Sender";

/// Fallback body when the message has no snippet.
pub const NO_BODY: &str = "No Body";

/// One fetched message, reduced to the fields the client renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSummary {
    /// Provider message identifier.
    pub id: String,

    pub subject: String,
    pub from: String,

    /// Snippet of the message body.
    pub body: String,

    /// Name of the list this message matched, when fetched per-list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
}

impl EmailSummary {
    /// Builds a summary applying the header fallbacks.
    pub fn from_parts(
        id: impl Into<String>,
        subject: Option<String>,
        from: Option<String>,
        body: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.unwrap_or_else(|| NO_SUBJECT.to_string()),
            from: from.unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            body: body.unwrap_or_else(|| NO_BODY.to_string()),
            list_name: None,
        }
    }

    /// Tags the summary with the list it matched.
    pub fn for_list(mut self, list_name: impl Into<String>) -> Self {
        self.list_name = Some(list_name.into());
        self
    }

    /// Sender category: the display part of `From` before any `<address>`.
    pub fn sender_category(&self) -> String {
        self.from
            .split('<')
            .next()
            .unwrap_or(&self.from)
            .trim()
            .to_string()
    }
}

/// A search expression in the mail provider's filter grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailQuery(String);

impl MailQuery {
    /// Matches messages whose sender matches the key: `from:"<key>"`.
    pub fn from_sender(key: &str) -> Self {
        Self(format!("from:{}", quote_key(key)))
    }

    /// Matches on sender or subject: `from:"<key>" OR subject:"<key>"`.
    pub fn from_sender_or_subject(key: &str) -> Self {
        let quoted = quote_key(key);
        Self(format!("from:{} OR subject:{}", quoted, quoted))
    }

    /// The whole mailbox, no filter.
    pub fn all() -> Self {
        Self(String::new())
    }

    /// The raw query string to hand to the provider.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Quotes a match key for the provider grammar.
///
/// Embedded double quotes are stripped (the grammar has no escape for them);
/// everything else is carried literally inside the quotes.
fn quote_key(key: &str) -> String {
    let cleaned: String = key.chars().filter(|c| *c != '"').collect();
    format!("\"{}\"", cleaned.trim())
}
