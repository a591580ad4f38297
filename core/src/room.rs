use crate::error::DecodeError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ROOM: &str = "Unknown Room";

const MAX_FALLBACK_LEN: usize = 50;

lazy_static! {
    static ref NAMED: Regex =
        Regex::new(r"(?i)room[ _-]?name[ _=:-]+([a-z][a-z _-]*)").expect("valid regex");
    static ref ROOM_TYPE: Regex = Regex::new(
        r"(?i)([a-z][a-z _-]*(?:room|suite|king|queen|double|single|deluxe|standard|premium))"
    )
    .expect("valid regex");
    static ref LEADING: Regex = Regex::new(r"(?i)^([a-z][a-z _-]*)").expect("valid regex");
    static ref SEPARATORS: Regex = Regex::new(r"[_-]+").expect("valid regex");
    static ref NON_LETTERS: Regex = Regex::new(r"[^A-Za-z\s]+").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// One offer from the room-prices endpoint. Rates without a suffix are in
/// USD; `*_in_currency` are in the requested display currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    pub key: String,
    #[serde(default, rename = "roomNormalizedDescription")]
    pub room_normalized_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_rate: Option<f64>,
    #[serde(default)]
    pub base_rate_in_currency: Option<f64>,
    #[serde(default)]
    pub included_taxes_and_fees_total: Option<f64>,
    #[serde(default)]
    pub included_taxes_and_fees_total_in_currency: Option<f64>,
    #[serde(default)]
    pub excluded_taxes_and_fees_total: Option<f64>,
    #[serde(default)]
    pub excluded_taxes_and_fees_total_in_currency: Option<f64>,
    #[serde(default)]
    pub rooms_available: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RoomOffer {
    pub fn display_name(&self) -> String {
        match self.room_normalized_description.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => room_name_from_key(&self.key),
        }
    }
}

/// Strict percent-decoding: every `%` must start a two-digit hex escape and
/// the result must be UTF-8.
pub fn decode_room_key(key: &str) -> Result<String, DecodeError> {
    let bytes = key.as_bytes();
    for (i, _) in key.match_indices('%') {
        let valid = bytes.get(i + 1..i + 3).is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(DecodeError::MalformedEscape(i));
        }
    }
    urlencoding::decode(key)
        .map(|s| s.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// Human-readable room name recovered from an opaque, URL-encoded room key.
pub fn room_name_from_key(key: &str) -> String {
    let decoded = match decode_room_key(key) {
        Ok(d) => d,
        Err(_) => return UNKNOWN_ROOM.to_string(),
    };

    for re in [&*NAMED, &*ROOM_TYPE, &*LEADING] {
        if let Some(m) = re.captures(&decoded).and_then(|c| c.get(1)) {
            let name = collapse(&SEPARATORS.replace_all(m.as_str(), " "));
            if !name.is_empty() {
                return name;
            }
        }
    }

    let letters = collapse(&NON_LETTERS.replace_all(&decoded, ""));
    let name: String = letters.chars().take(MAX_FALLBACK_LEN).collect();
    let name = name.trim_end();
    if name.is_empty() { UNKNOWN_ROOM.to_string() } else { name.to_string() }
}

fn collapse(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}
