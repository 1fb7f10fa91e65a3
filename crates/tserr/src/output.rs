//! Parsed diagnostic records.
//!
//! [`ParsedError`] serializes to the JSON shape consumers expect:
//!
//! ```json
//! {
//!   "code": 2741,
//!   "error": "Property '{0}' is missing in type '{1}' but required in type '{2}'.",
//!   "improvedError": null,
//!   "parseInfo": { "startIndex": 0, "endIndex": 91, "items": ["wow", "{}", "{ wow: number; }"] }
//! }
//! ```
//!
//! With legacy item fields enabled, `parseInfo` carries `firstItem`,
//! `secondItem`, ... in place of `items`.

use std::borrow::Cow;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::explanation::Explanation;

const ORDINAL_ITEM_FIELDS: [&str; 10] = [
    "firstItem",
    "secondItem",
    "thirdItem",
    "fourthItem",
    "fifthItem",
    "sixthItem",
    "seventhItem",
    "eighthItem",
    "ninthItem",
    "tenthItem",
];

/// One diagnostic message recognized in a blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedError {
    code: u32,
    error: String,
    improved_error: Option<Explanation>,
    parse_info: ParseInfo,
}

impl ParsedError {
    pub(crate) fn new(
        code: u32,
        error: impl Into<String>,
        improved_error: Option<Explanation>,
        parse_info: ParseInfo,
    ) -> Self {
        Self {
            code,
            error: error.into(),
            improved_error,
            parse_info,
        }
    }

    /// The diagnostic code.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// The matched template, placeholders intact.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// The rendered explanation, if one was loaded.
    pub fn improved_error(&self) -> Option<&Explanation> {
        self.improved_error.as_ref()
    }

    /// Offsets and placeholder values of the match.
    pub fn parse_info(&self) -> &ParseInfo {
        &self.parse_info
    }
}

/// Where a message was found and what filled its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInfo {
    start_index: usize,
    end_index: usize,
    items: Vec<String>,
    legacy_item_fields: bool,
}

impl ParseInfo {
    pub(crate) fn new(
        start_index: usize,
        end_index: usize,
        items: Vec<String>,
        legacy_item_fields: bool,
    ) -> Self {
        Self {
            start_index,
            end_index,
            items,
            legacy_item_fields,
        }
    }

    /// Offset of the start of the message in the blob.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Offset just past the end of the message in the blob.
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Placeholder values; `items()[i]` filled `{i}`.
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

/// Name of the legacy field for the item at `index`.
fn legacy_field_name(index: usize) -> Cow<'static, str> {
    match ORDINAL_ITEM_FIELDS.get(index) {
        Some(name) => Cow::Borrowed(*name),
        None => Cow::Owned(format!("item{}", index + 1)),
    }
}

impl Serialize for ParseInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("startIndex", &self.start_index)?;
        map.serialize_entry("endIndex", &self.end_index)?;
        if self.legacy_item_fields {
            for (index, item) in self.items.iter().enumerate() {
                map.serialize_entry(&legacy_field_name(index), item)?;
            }
        } else {
            map.serialize_entry("items", &self.items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse_info(legacy: bool) -> ParseInfo {
        ParseInfo::new(0, 92, vec!["{}".to_string(), "Foo".to_string()], legacy)
    }

    #[test]
    fn test_serialize_items() {
        let parsed = ParsedError::new(
            2345,
            "Argument of type '{0}' is not assignable to parameter of type '{1}'.",
            None,
            parse_info(false),
        );

        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({
                "code": 2345,
                "error": "Argument of type '{0}' is not assignable to parameter of type '{1}'.",
                "improvedError": null,
                "parseInfo": {
                    "startIndex": 0,
                    "endIndex": 92,
                    "items": ["{}", "Foo"],
                },
            })
        );
    }

    #[test]
    fn test_serialize_legacy_item_fields() {
        assert_eq!(
            serde_json::to_value(parse_info(true)).unwrap(),
            json!({
                "startIndex": 0,
                "endIndex": 92,
                "firstItem": "{}",
                "secondItem": "Foo",
            })
        );
    }

    #[test]
    fn test_legacy_field_names() {
        assert_eq!(legacy_field_name(0), "firstItem");
        assert_eq!(legacy_field_name(9), "tenthItem");
        assert_eq!(legacy_field_name(10), "item11");
    }
}
