//! Destination of imported slides.

use deck_core::types::Slide;

/// Mutation points of the editor's slide state.
#[cfg_attr(test, mockall::automock)]
pub trait SlideStore {
    /// Whether the store holds nothing, or a single slide without elements.
    fn is_empty(&self) -> bool;

    fn set_slides(&mut self, slides: Vec<Slide>);

    fn append_slides(&mut self, slides: Vec<Slide>);

    fn set_viewport_size(&mut self, size: f64);

    fn set_theme_colors(&mut self, colors: Vec<String>);

    fn update_slide_index(&mut self, index: usize);
}

/// How imported slides are merged into a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Replace every slide and select the first one.
    #[default]
    Replace,
    /// Replace when the store is empty, append otherwise.
    ReplaceIfEmpty,
    /// Append after the existing slides.
    Append,
}

impl MergeStrategy {
    pub fn apply<S>(self, store: &mut S, slides: Vec<Slide>)
    where
        S: SlideStore + ?Sized,
    {
        match self {
            MergeStrategy::Replace => {
                store.update_slide_index(0);
                store.set_slides(slides);
            }
            MergeStrategy::ReplaceIfEmpty if store.is_empty() => store.set_slides(slides),
            MergeStrategy::ReplaceIfEmpty | MergeStrategy::Append => store.append_slides(slides),
        }
    }
}

/// In-memory [`SlideStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slides: Vec<Slide>,
    slide_index: usize,
    viewport_size: Option<f64>,
    theme_colors: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one empty slide, like a freshly opened editor.
    pub fn with_blank_slide() -> Self {
        Self {
            slides: vec![Slide::new(Default::default())],
            ..Self::default()
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn into_slides(self) -> Vec<Slide> {
        self.slides
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn viewport_size(&self) -> Option<f64> {
        self.viewport_size
    }

    pub fn theme_colors(&self) -> &[String] {
        &self.theme_colors
    }
}

impl SlideStore for MemoryStore {
    fn is_empty(&self) -> bool {
        match self.slides.as_slice() {
            [] => true,
            [only] => only.elements.is_empty(),
            _ => false,
        }
    }

    fn set_slides(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
        self.slide_index = self.slide_index.min(self.slides.len().saturating_sub(1));
    }

    fn append_slides(&mut self, slides: Vec<Slide>) {
        self.slides.extend(slides);
    }

    fn set_viewport_size(&mut self, size: f64) {
        self.viewport_size = Some(size);
    }

    fn set_theme_colors(&mut self, colors: Vec<String>) {
        self.theme_colors = colors;
    }

    fn update_slide_index(&mut self, index: usize) {
        self.slide_index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::types::{Element, SlideBackground, VideoElement};

    fn slides(n: usize) -> Vec<Slide> {
        (0..n).map(|_| Slide::new(SlideBackground::default())).collect()
    }

    fn non_blank() -> Slide {
        let mut slide = Slide::new(SlideBackground::default());
        slide.elements.push(Element::Video(VideoElement {
            id: "v".to_string(),
            left: 0.0,
            top: 0.0,
            width: 1.0,
            height: 1.0,
            rotate: 0.0,
            src: String::new(),
            autoplay: false,
        }));
        slide
    }

    #[test]
    fn test_memory_store_emptiness() {
        assert!(MemoryStore::new().is_empty());
        assert!(MemoryStore::with_blank_slide().is_empty());

        let mut store = MemoryStore::new();
        store.set_slides(vec![non_blank()]);
        assert!(!store.is_empty());

        store.set_slides(slides(2));
        assert!(!store.is_empty());
    }

    #[test]
    fn test_replace() {
        let mut store = MemoryStore::new();
        store.set_slides(slides(3));
        store.update_slide_index(2);

        MergeStrategy::Replace.apply(&mut store, slides(1));
        assert_eq!(store.slides().len(), 1);
        assert_eq!(store.slide_index(), 0);
    }

    #[test]
    fn test_replace_if_empty() {
        let mut store = MemoryStore::with_blank_slide();
        MergeStrategy::ReplaceIfEmpty.apply(&mut store, slides(2));
        assert_eq!(store.slides().len(), 2);

        let mut store = MemoryStore::new();
        store.set_slides(vec![non_blank()]);
        MergeStrategy::ReplaceIfEmpty.apply(&mut store, slides(2));
        assert_eq!(store.slides().len(), 3);
    }

    #[test]
    fn test_append() {
        let mut store = MemoryStore::with_blank_slide();
        MergeStrategy::Append.apply(&mut store, slides(2));
        assert_eq!(store.slides().len(), 3);
    }

    #[test]
    fn test_replace_calls_store_in_order() {
        let mut seq = mockall::Sequence::new();
        let mut store = MockSlideStore::new();
        store
            .expect_update_slide_index()
            .with(mockall::predicate::eq(0))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        store
            .expect_set_slides()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        MergeStrategy::Replace.apply(&mut store, slides(1));
    }
}
