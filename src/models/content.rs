//! Content model shared by games and DLCs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Release date format used for input and output ("23 Aug, 2016").
pub const DATE_FORMAT: &str = "%d %b, %Y";

/// A game, DLC or other content node.
///
/// Deserializes from the stored node properties (`date` as ISO
/// `YYYY-MM-DD`) and serializes to the public API shape (`date` as
/// "DD Mon, YYYY").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub name: String,
    pub node_id: String,
    pub is_free: bool,
    pub long_desc: String,
    pub short_desc: String,
    #[serde(default, serialize_with = "serialize_release_date")]
    pub date: Option<NaiveDate>,
    pub header_image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub movies: Vec<String>,
}

/// Parses a release date in [`DATE_FORMAT`].
///
/// Returns `None` for anything unparseable; callers store that as "no date".
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Formats a release date in [`DATE_FORMAT`].
pub fn format_release_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn serialize_release_date<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.serialize_str(&format_release_date(date)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("23 Aug, 2016"),
            NaiveDate::from_ymd_opt(2016, 8, 23)
        );
        assert_eq!(
            parse_release_date("03 Jan, 2020"),
            NaiveDate::from_ymd_opt(2020, 1, 3)
        );
    }

    #[test]
    fn test_parse_release_date_rejects_other_formats() {
        assert_eq!(parse_release_date("2016-08-23"), None);
        assert_eq!(parse_release_date("Coming soon"), None);
        assert_eq!(parse_release_date(""), None);
    }

    #[test]
    fn test_stored_properties_to_api_shape() {
        let stored = json!({
            "name": "Test Game",
            "node_id": "01HZX",
            "is_free": false,
            "short_desc": "short description",
            "long_desc": "Detailed description.",
            "date": "2016-08-23",
            "header_image": "https://test.url",
            "images": ["https://test.url/1.png"],
        });

        let content: Content = serde_json::from_value(stored).unwrap();
        assert!(content.movies.is_empty());

        let api = serde_json::to_value(&content).unwrap();
        assert_eq!(api["date"], json!("23 Aug, 2016"));
        assert_eq!(api["images"], json!(["https://test.url/1.png"]));
        assert_eq!(api["movies"], json!([]));
    }

    #[test]
    fn test_missing_date_serializes_as_null() {
        let stored = json!({
            "name": "Dateless",
            "node_id": "01HZY",
            "is_free": true,
            "short_desc": "s",
            "long_desc": "l",
            "header_image": "https://test.url",
        });

        let content: Content = serde_json::from_value(stored).unwrap();
        assert_eq!(content.date, None);
        let api = serde_json::to_value(&content).unwrap();
        assert!(api["date"].is_null());
    }
}
