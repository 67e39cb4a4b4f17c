//! Line and rider message types.

use serde::Serialize;

/// A rider-facing message attached to a line or journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub content: String,
}

/// A transit line, e.g. "LEB" (Lausanne-Flon - Bercher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// API identifier. Empty when the API omits it (lines nested in stops).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short code shown on vehicles and maps.
    pub short_name: String,
    /// Messages currently published for this line, in API order.
    pub messages: Vec<Message>,
}

impl Line {
    /// Returns true if the API sent an identifier for this line.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
