//! Import orchestration.
//!
//! An import decodes the input, converts it, rasterizes legacy pictures and
//! only then touches the store. Any document-level error returns before
//! the store is mutated.

use crate::parser::{parse_slides, DocumentParser, InputVariant, JsonTreeParser};
use crate::store::{MergeStrategy, SlideStore};
use crate::transcode::{transcode_legacy_images, ImageTranscoder, NoTranscoder, Notice};
use deck_core::types::Slide;
use deck_core::{DeckConverter, Diagnostic, Result};
use std::path::Path;

/// Options for [`Importer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    merge: MergeStrategy,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merge_strategy(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        self.merge
    }
}

/// Summary of a finished import.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub slide_count: usize,
    /// Set for raw-tree imports only.
    pub viewport_size: Option<f64>,
    /// Elements dropped during conversion.
    pub diagnostics: Vec<Diagnostic>,
    /// Recoverable problems such as pictures that kept their source.
    pub notices: Vec<Notice>,
}

/// Everything an import produces before it is committed.
struct Prepared {
    slides: Vec<Slide>,
    viewport_size: Option<f64>,
    theme_colors: Option<Vec<String>>,
    diagnostics: Vec<Diagnostic>,
}

/// Imports documents into a [`SlideStore`].
pub struct Importer<P, T> {
    parser: P,
    transcoder: T,
    converter: DeckConverter,
    options: ImportOptions,
}

impl Default for Importer<JsonTreeParser, NoTranscoder> {
    fn default() -> Self {
        Self::new(JsonTreeParser, NoTranscoder, DeckConverter::default())
    }
}

impl<P, T> Importer<P, T>
where
    P: DocumentParser,
    T: ImageTranscoder,
{
    pub fn new(parser: P, transcoder: T, converter: DeckConverter) -> Self {
        Self {
            parser,
            transcoder,
            converter,
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Read a file and import it.
    pub async fn import_file<S>(
        &self,
        path: impl AsRef<Path>,
        variant: InputVariant,
        store: &mut S,
    ) -> Result<ImportReport>
    where
        S: SlideStore + ?Sized,
    {
        let path = path.as_ref();
        log::debug!("Reading {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            e
        })?;
        self.import_bytes(&bytes, variant, store).await
    }

    /// Import a document already held in memory.
    pub async fn import_bytes<S>(
        &self,
        bytes: &[u8],
        variant: InputVariant,
        store: &mut S,
    ) -> Result<ImportReport>
    where
        S: SlideStore + ?Sized,
    {
        let mut prepared = self.prepare(bytes, variant).await.map_err(|e| {
            log::error!("Import aborted: {}", e);
            e
        })?;

        let notices = transcode_legacy_images(&mut prepared.slides, &self.transcoder).await;

        let report = ImportReport {
            slide_count: prepared.slides.len(),
            viewport_size: prepared.viewport_size,
            diagnostics: prepared.diagnostics,
            notices,
        };

        if let Some(size) = prepared.viewport_size {
            store.set_viewport_size(size);
        }
        if let Some(colors) = prepared.theme_colors {
            store.set_theme_colors(colors);
        }
        self.options.merge_strategy().apply(store, prepared.slides);

        log::debug!(
            "Imported {} slides ({} dropped elements, {} notices)",
            report.slide_count,
            report.diagnostics.len(),
            report.notices.len()
        );
        Ok(report)
    }

    async fn prepare(&self, bytes: &[u8], variant: InputVariant) -> Result<Prepared> {
        match variant {
            InputVariant::Slides => {
                let mut slides = parse_slides(bytes)?;
                // Re-imported slides may collide with slides already open.
                for slide in &mut slides {
                    slide.refresh_ids();
                }
                Ok(Prepared {
                    slides,
                    viewport_size: None,
                    theme_colors: None,
                    diagnostics: Vec::new(),
                })
            }
            InputVariant::RawTree => {
                let document = self.parser.parse(bytes).await?;
                let conversion = self.converter.convert(document);
                Ok(Prepared {
                    slides: conversion.slides,
                    viewport_size: Some(conversion.viewport_size),
                    theme_colors: Some(conversion.theme_colors),
                    diagnostics: conversion.diagnostics,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MockDocumentParser;
    use crate::store::{MemoryStore, MockSlideStore};
    use crate::transcode::MockImageTranscoder;
    use deck_core::types::Element;
    use deck_core::{ConvertOptions, Error, RawDocument, ViewportMode};
    use serde_json::json;
    use std::io::Write;

    fn raw_bytes(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[tokio::test]
    async fn test_empty_document_yields_no_slides() {
        let mut store = MemoryStore::new();
        let report = Importer::default()
            .import_bytes(b"{}", InputVariant::RawTree, &mut store)
            .await
            .unwrap();
        assert_eq!(report.slide_count, 0);
        assert!(store.slides().is_empty());
    }

    #[tokio::test]
    async fn test_raw_tree_import_updates_store() {
        let importer = Importer::new(
            JsonTreeParser,
            NoTranscoder,
            DeckConverter::new(ConvertOptions::new().with_viewport_mode(ViewportMode::Fixed)),
        );
        let mut store = MemoryStore::with_blank_slide();

        let report = importer
            .import_bytes(
                &raw_bytes(json!({
                    "size": {"width": 500, "height": 300},
                    "themeColors": ["#101010"],
                    "slides": [
                        {"elements": [{"type": "text", "left": 1, "top": 2, "width": 3, "height": 4}]},
                        {"fill": {"type": "color", "value": "#eee"}}
                    ]
                })),
                InputVariant::RawTree,
                &mut store,
            )
            .await
            .unwrap();

        assert_eq!(report.slide_count, 2);
        assert_eq!(report.viewport_size, Some(1000.0));
        assert_eq!(store.slides().len(), 2);
        assert_eq!(store.viewport_size(), Some(1000.0));
        assert_eq!(store.theme_colors(), ["#101010".to_string()]);
        assert_eq!(store.slides()[0].elements[0].position(), [2.0, 4.0]);
    }

    #[tokio::test]
    async fn test_unreadable_input_leaves_store_untouched() {
        // A store mock without expectations panics on any call.
        let mut store = MockSlideStore::new();

        for (bytes, variant) in [
            (&b"[1, 2"[..], InputVariant::RawTree),
            (&b"[]"[..], InputVariant::RawTree),
            (&b"{}"[..], InputVariant::Slides),
        ] {
            let err = Importer::default()
                .import_bytes(bytes, variant, &mut store)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::UnreadableInput(_)));
        }
    }

    #[tokio::test]
    async fn test_parser_error_is_propagated() {
        let mut parser = MockDocumentParser::new();
        parser
            .expect_parse()
            .returning(|_| Err(Error::ParserError("truncated stream".to_string())));

        let importer = Importer::new(parser, NoTranscoder, DeckConverter::default());
        let mut store = MemoryStore::with_blank_slide();
        let err = importer
            .import_bytes(b"\xd0\xcf\x11\xe0", InputVariant::RawTree, &mut store)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ParserError(_)));
        assert_eq!(store.slides().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_parser_output_is_converted() {
        let mut parser = MockDocumentParser::new();
        parser.expect_parse().times(1).returning(|_| {
            Ok(serde_json::from_value::<RawDocument>(json!({
                "slides": [{"elements": [{"type": "shape", "shapType": "nonsense"}]}]
            }))
            .unwrap())
        });

        let importer = Importer::new(parser, NoTranscoder, DeckConverter::default());
        let mut store = MemoryStore::new();
        let report = importer
            .import_bytes(b"binary", InputVariant::RawTree, &mut store)
            .await
            .unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert!(store.slides()[0].elements.is_empty());
    }

    #[tokio::test]
    async fn test_bad_element_keeps_rest_of_deck() {
        let mut store = MemoryStore::new();
        let report = Importer::default()
            .import_bytes(
                &raw_bytes(json!({
                    "slides": [
                        {"elements": [
                            {"type": "text", "left": 1, "top": 2, "width": 3, "height": 4},
                            {"type": "ink", "left": 0}
                        ]},
                        {"elements": [{"type": "shape", "shapType": "rect", "fill": "", "width": 5, "height": 5}]}
                    ]
                })),
                InputVariant::RawTree,
                &mut store,
            )
            .await
            .unwrap();

        assert_eq!(report.slide_count, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, "ink");
        assert_eq!(store.slides()[0].elements.len(), 1);
        assert_eq!(store.slides()[1].elements.len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_images_are_transcoded_before_commit() {
        let mut transcoder = MockImageTranscoder::new();
        transcoder
            .expect_transcode()
            .times(1)
            .returning(|_| Ok("UE5H".to_string()));

        let importer = Importer::new(JsonTreeParser, transcoder, DeckConverter::default());
        let mut store = MemoryStore::new();
        let report = importer
            .import_bytes(
                &raw_bytes(json!({
                    "slides": [{"elements": [
                        {"type": "image", "src": "data:image/x-emf;base64,RU1G", "width": 10, "height": 10}
                    ]}]
                })),
                InputVariant::RawTree,
                &mut store,
            )
            .await
            .unwrap();

        assert!(report.notices.is_empty());
        match &store.slides()[0].elements[0] {
            Element::Image(image) => assert_eq!(image.src, "data:image/png;base64,UE5H"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slides_import_refreshes_ids() {
        let exported = json!([
            {"id": "s1", "elements": [
                {"type": "video", "id": "e1", "left": 1, "top": 2, "width": 3, "height": 4, "src": "a.mp4", "autoplay": false}
            ], "background": {"type": "solid", "color": "#fff"}}
        ]);

        let mut store = MemoryStore::new();
        let report = Importer::default()
            .with_options(ImportOptions::new().with_merge_strategy(MergeStrategy::Append))
            .import_bytes(&raw_bytes(exported), InputVariant::Slides, &mut store)
            .await
            .unwrap();

        assert_eq!(report.viewport_size, None);
        let slide = &store.slides()[0];
        assert_ne!(slide.id, "s1");
        assert_ne!(slide.elements[0].id(), "e1");
        assert_eq!(slide.elements[0].position(), [1.0, 2.0]);
    }

    #[tokio::test]
    async fn test_import_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"slides": [{}, {}, {}]}"#).unwrap();

        let mut store = MemoryStore::new();
        let report = Importer::default()
            .import_file(file.path(), InputVariant::RawTree, &mut store)
            .await
            .unwrap();
        assert_eq!(report.slide_count, 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryStore::new();
        let err = Importer::default()
            .import_file(dir.path().join("missing.json"), InputVariant::RawTree, &mut store)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
