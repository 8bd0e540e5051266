//! History codec - the open sheet subset as a URL query value
//!
//! Each open sheet becomes a compact `{t, p, i}` record; the ordered list is
//! serialized as JSON and, when compaction is enabled, wrapped in URL-safe
//! unpadded base64. Decoding fails soft: a corrupted or hand-edited value
//! degrades to "no sheets open" and a warning in the log.

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::SheetConfig;
use crate::history::location;
use crate::model::{Props, Sheet, SheetId, SheetKind};

/// Persisted form of one open sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    #[serde(rename = "t")]
    pub kind: SheetKind,
    #[serde(rename = "p", default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(rename = "i")]
    pub id: SheetId,
}

impl From<&Sheet> for SheetRecord {
    fn from(sheet: &Sheet) -> Self {
        Self {
            kind: sheet.kind,
            props: sheet.props.clone(),
            id: sheet.id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid sheet list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode the open subset. An empty subset encodes to an empty string,
/// which callers treat as "remove the parameter".
pub fn encode(records: &[SheetRecord], compress: bool) -> String {
    if records.is_empty() {
        return String::new();
    }

    let json = match serde_json::to_string(records) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize sheet stack: {}", e);
            return String::new();
        }
    };

    if compress {
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    } else {
        json
    }
}

/// Decode a parameter value back into ordered records. Never fails.
pub fn decode(raw: &str, compress: bool) -> Vec<SheetRecord> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match try_decode(raw, compress) {
        Ok(records) => dedup_ids(records),
        Err(e) => {
            tracing::warn!("Ignoring malformed sheet stack in URL: {}", e);
            Vec::new()
        }
    }
}

fn try_decode(raw: &str, compress: bool) -> Result<Vec<SheetRecord>, DecodeError> {
    // Readable JSON is accepted even when compaction is on, so hand-written
    // deep links keep working.
    let json = if compress && !raw.starts_with('[') {
        let bytes = URL_SAFE_NO_PAD.decode(raw.as_bytes())?;
        String::from_utf8(bytes)?
    } else {
        raw.to_string()
    };

    Ok(serde_json::from_str(&json)?)
}

fn dedup_ids(records: Vec<SheetRecord>) -> Vec<SheetRecord> {
    let mut seen = HashSet::new();
    let total = records.len();
    let unique: Vec<_> = records.into_iter().filter(|r| seen.insert(r.id)).collect();
    if unique.len() != total {
        tracing::warn!(
            "Dropped {} duplicate sheet ids from URL",
            total - unique.len()
        );
    }
    unique
}

/// Decode the sheet stack carried by a full URL under the configured parameter
pub fn decode_url(url: &str, config: &SheetConfig) -> Vec<SheetRecord> {
    match location::read_param(url, &config.param_name) {
        Some(raw) => decode(&raw, config.compress_data),
        None => Vec::new(),
    }
}
