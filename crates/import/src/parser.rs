//! Input decoding: raw trees through a [`DocumentParser`], slide arrays
//! directly.

use async_trait::async_trait;
use deck_core::types::Slide;
use deck_core::{Error, RawDocument, Result};

/// Which document shape the caller is supplying.
///
/// Inputs are decoded strictly as the declared variant; nothing is guessed
/// from the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVariant {
    /// A previously exported array of editor slides.
    Slides,
    /// A raw tree that still needs normalizing.
    RawTree,
}

/// Turns input bytes into a raw document tree.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, bytes: &[u8]) -> Result<RawDocument>;
}

/// Parser for raw trees that were already dumped to JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl JsonTreeParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for JsonTreeParser {
    async fn parse(&self, bytes: &[u8]) -> Result<RawDocument> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::UnreadableInput(format!("Invalid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(Error::UnreadableInput(
                "Expected a raw document object at the top level".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::UnreadableInput(format!("Malformed raw document: {}", e)))
    }
}

/// Decode an exported slide array.
pub fn parse_slides(bytes: &[u8]) -> Result<Vec<Slide>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::UnreadableInput(format!("Invalid JSON: {}", e)))?;

    if !value.is_array() {
        return Err(Error::UnreadableInput(
            "Expected an array of slides at the top level".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::UnreadableInput(format!("Malformed slide: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_tree_parser() {
        let doc = JsonTreeParser::new()
            .parse(br#"{"slides": [{"elements": []}], "size": {"width": 960}}"#)
            .await
            .unwrap();
        assert_eq!(doc.slides.len(), 1);
        assert_eq!(doc.size.width, 960.0);
    }

    #[tokio::test]
    async fn test_json_tree_parser_rejects_other_shapes() {
        let inputs: [&[u8]; 4] = [b"[]", b"42", b"not json", br#"{"slides": 3}"#];
        for input in inputs {
            let err = JsonTreeParser::new().parse(input).await.unwrap_err();
            assert!(matches!(err, Error::UnreadableInput(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_parse_slides() {
        let slides = parse_slides(
            br##"[{"id": "a", "elements": [], "background": {"type": "solid", "color": "#000"}}]"##,
        )
        .unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].id, "a");
        assert_eq!(slides[0].remark, "");
    }

    #[test]
    fn test_parse_slides_rejects_objects() {
        let err = parse_slides(br#"{"slides": []}"#).unwrap_err();
        assert!(matches!(err, Error::UnreadableInput(_)));
    }
}
