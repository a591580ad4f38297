use serde::{Deserialize, Deserializer, Serialize};

/// Cap on the number of gallery images derived from [`ImageDetails`].
pub const MAX_IMAGES: u32 = 11;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    #[serde(default)]
    pub prefix: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u32,
    #[serde(default)]
    pub suffix: String,
}

/// Hotel object as returned by `GET /api/hotels/{id}`. Fields not modelled
/// here are kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_details: Option<ImageDetails>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Hotel {
    pub fn image_urls(&self) -> Vec<String> {
        self.image_details.as_ref().map(image_urls).unwrap_or_default()
    }
}

/// Negative, fractional or non-numeric counts mean no gallery.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
}

/// `{prefix}{i}{suffix}` for `i` in `1..=min(count, MAX_IMAGES)`.
pub fn image_urls(details: &ImageDetails) -> Vec<String> {
    (1..=details.count.min(MAX_IMAGES))
        .map(|i| format!("{}{}{}", details.prefix, i, details.suffix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(count: u32) -> ImageDetails {
        ImageDetails { prefix: "https://img.example/h/".into(), count, suffix: ".jpg".into() }
    }

    #[test]
    fn caps_image_count() {
        let urls = image_urls(&details(15));
        assert_eq!(urls.len(), 11);
        assert_eq!(urls[0], "https://img.example/h/1.jpg");
        assert_eq!(urls[10], "https://img.example/h/11.jpg");
        assert_eq!(image_urls(&details(3)).len(), 3);
    }

    #[test]
    fn no_images_without_details() {
        assert!(image_urls(&details(0)).is_empty());
        let hotel: Hotel = serde_json::from_str(r#"{"id":"diH7","name":"The Fullerton"}"#).unwrap();
        assert!(hotel.image_urls().is_empty());
    }

    #[test]
    fn malformed_count_means_no_images() {
        for count in ["-1", "2.5", "\"many\"", "null"] {
            let json = format!(r#"{{"id":"diH7","image_details":{{"prefix":"p/","count":{count},"suffix":".jpg"}}}}"#);
            let hotel: Hotel = serde_json::from_str(&json).unwrap();
            assert_eq!(hotel.image_details.as_ref().unwrap().count, 0);
            assert!(hotel.image_urls().is_empty());
        }
    }

    #[test]
    fn absent_fields_are_not_emitted() {
        let hotel: Hotel = serde_json::from_str(r#"{"id":"diH7","name":"X","stars":4}"#).unwrap();
        let out = serde_json::to_string(&hotel).unwrap();
        assert!(!out.contains("null"), "got {out}");
        assert!(out.contains(r#""stars":4"#));
    }

    #[test]
    fn keeps_unknown_fields() {
        let hotel: Hotel = serde_json::from_str(
            r#"{"id":"diH7","name":"X","amenities":{"pool":true},"image_details":{"prefix":"p/","count":2,"suffix":".jpg"}}"#,
        )
        .unwrap();
        assert_eq!(hotel.extra["amenities"]["pool"], serde_json::Value::Bool(true));
        assert_eq!(hotel.image_urls(), vec!["p/1.jpg", "p/2.jpg"]);
    }
}
