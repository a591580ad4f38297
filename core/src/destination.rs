use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One entry of the destination dataset. Only `term`, `state` and `kind`
/// are searchable; the rest is payload handed back to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl Destination {
    /// `term`, `state` and `type`, in that order, skipping absent or empty
    /// values, joined by a single space and lower-cased.
    pub fn searchable_text(&self) -> String {
        [&self.term, &self.state, &self.kind]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// Load destinations from a `.jsonl` file (one record per line) or a JSON
/// file holding either an array of records or a single record.
pub fn load_destinations(path: &Path) -> Result<Vec<Destination>> {
    let file = File::open(path).map_err(|e| anyhow!("open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut out = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            out.push(serde_json::from_str(&line)?);
        }
        return Ok(out);
    }
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(Into::into))
            .collect(),
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(json)?]),
        _ => Err(anyhow!("{}: expected an array or object of destinations", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_text_skips_missing_fields() {
        let d = Destination {
            term: Some("Monaco, FR".into()),
            state: None,
            kind: Some("City".into()),
            ..Default::default()
        };
        assert_eq!(d.searchable_text(), "monaco, fr city");

        let empty = Destination { term: Some(String::new()), ..Default::default() };
        assert_eq!(empty.searchable_text(), "");
    }

    #[test]
    fn deserializes_upstream_shape() {
        let d: Destination = serde_json::from_str(
            r#"{"term":"Rome, Italy","uid":"A6Dz","lat":41.89,"lng":12.48,"type":"city"}"#,
        )
        .unwrap();
        assert_eq!(d.uid, "A6Dz");
        assert_eq!(d.kind.as_deref(), Some("city"));
        assert!(d.state.is_none());
    }
}
