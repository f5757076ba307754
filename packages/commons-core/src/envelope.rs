//! # Pagination Envelope
//!
//! Codec for the backend's list contract:
//!
//! ```text
//! { "count": 57, "next": "https://…?page=3", "previous": "https://…?page=1", "results": [ … ] }
//! ```
//!
//! Decoding validates the envelope fields first, then decodes each entry of
//! `results` with the resource's serde decoder. It is pure: no I/O, no
//! logging. Every failure is [`Error::MalformedEnvelope`] naming the
//! offending field.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{Error, Result};

/// Which cursor to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageDirection {
    /// The `next` cursor
    Next,
    /// The `previous` cursor
    Previous,
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageDirection::Next => f.write_str("next"),
            PageDirection::Previous => f.write_str("previous"),
        }
    }
}

/// One page of a paginated resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationEnvelope<T> {
    /// Total number of items across all pages
    pub count: u64,
    /// Absolute URL of the next page
    pub next: Option<String>,
    /// Absolute URL of the previous page
    pub previous: Option<String>,
    /// Items on this page, in server order
    pub results: Vec<T>,
}

impl<T> PaginationEnvelope<T> {
    /// The cursor for `direction`, if the server provided one.
    pub fn cursor(&self, direction: PageDirection) -> Option<&str> {
        match direction {
            PageDirection::Next => self.next.as_deref(),
            PageDirection::Previous => self.previous.as_deref(),
        }
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether this page is empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T: DeserializeOwned> PaginationEnvelope<T> {
    /// Decode a response body.
    pub fn decode_str(body: &str) -> Result<Self> {
        let payload: Value = serde_json::from_str(body)?;
        Self::decode(&payload)
    }

    /// Decode an already-parsed payload.
    pub fn decode(payload: &Value) -> Result<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| malformed("envelope must be a JSON object"))?;

        let count = required(object, "count")?
            .as_u64()
            .ok_or_else(|| malformed("`count` must be a non-negative integer"))?;
        let next = cursor_field(object, "next")?;
        let previous = cursor_field(object, "previous")?;

        let entries = required(object, "results")?
            .as_array()
            .ok_or_else(|| malformed("`results` must be an array"))?;

        if entries.len() as u64 > count {
            return Err(malformed(format!(
                "`results` holds {} items but `count` is {}",
                entries.len(),
                count
            )));
        }

        let results = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                T::deserialize(entry)
                    .map_err(|e| malformed(format!("results[{index}]: {e}")))
            })
            .collect::<Result<Vec<T>>>()?;

        Ok(Self {
            count,
            next,
            previous,
            results,
        })
    }
}

impl<T: Serialize> PaginationEnvelope<T> {
    /// Encode back into the wire shape.
    pub fn encode(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Internal(e.to_string()))
    }
}

/// Decode a plain JSON array (endpoints without an envelope).
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let payload: Value = serde_json::from_str(body)?;
    let entries = payload
        .as_array()
        .ok_or_else(|| malformed("expected a JSON array"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            T::deserialize(entry).map_err(|e| malformed(format!("[{index}]: {e}")))
        })
        .collect()
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| malformed(format!("missing field `{field}`")))
}

fn cursor_field(object: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    match required(object, field)? {
        Value::Null => Ok(None),
        Value::String(raw) => {
            let url = Url::parse(raw)
                .map_err(|e| malformed(format!("`{field}` is not an absolute URL: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(malformed(format!("`{field}` must be an http(s) URL")));
            }
            Ok(Some(raw.clone()))
        }
        _ => Err(malformed(format!("`{field}` must be a URL or null"))),
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedEnvelope(message.into())
}
