//! Continuation cursors.
//!
//! Cursors are opaque to clients: they are produced by a backend, round
//! tripped verbatim through the `cursor` query parameter, and decoded only by
//! the backend that issued them.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// An offset cursor for the in-memory backend.
///
/// # Encoding
///
/// Base64url (no padding) of a JSON object holding a format version and the
/// offset of the next result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Cursor format version.
    version: u8,

    /// Offset of the first result of the next page.
    offset: usize,
}

impl PageCursor {
    /// Creates a cursor pointing at the given offset.
    pub fn new(offset: usize) -> Self {
        Self { version: 1, offset }
    }

    /// Returns the offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Encodes the cursor to an opaque string.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(&json)
    }

    /// Decodes a cursor from an opaque string.
    pub fn decode(s: &str) -> Result<Self, SearchError> {
        let invalid = || SearchError::InvalidCursor {
            cursor: s.to_string(),
        };

        let bytes = URL_SAFE_NO_PAD.decode(s).map_err(|_| invalid())?;
        let cursor: PageCursor = serde_json::from_slice(&bytes).map_err(|_| invalid())?;

        if cursor.version != 1 {
            return Err(invalid());
        }
        Ok(cursor)
    }
}
