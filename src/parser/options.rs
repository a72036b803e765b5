//! Normalization options and configuration.

/// Default minimum length (in characters) of an emitted plain-text block.
pub const DEFAULT_SHORT_TEXT_THRESHOLD: usize = 20;

/// Default heading level for headings without a usable numeral.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Options for normalizing one document.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Plain text shorter than this (trimmed, in characters) is buffered
    /// and merged with following text
    pub short_text_threshold: usize,

    /// Heading level used when the style carries no valid level (1-6)
    pub heading_level_default: u8,

    /// How ordered list items are numbered
    pub list_numbering: ListNumbering,

    /// Prepend the metadata title as a level-1 heading (word-processor input)
    pub title_heading: bool,

    /// Alt text of appended image references
    pub image_alt: String,

    /// Error handling mode for unclassifiable fragments
    pub error_mode: ErrorMode,

    /// Whether batches are processed in parallel
    pub parallel: bool,
}

impl NormalizeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short-text threshold.
    pub fn with_short_text_threshold(mut self, threshold: usize) -> Self {
        self.short_text_threshold = threshold;
        self
    }

    /// Set the default heading level.
    pub fn with_heading_level_default(mut self, level: u8) -> Self {
        self.heading_level_default = level.clamp(1, 6);
        self
    }

    /// Set the list numbering mode.
    pub fn with_list_numbering(mut self, numbering: ListNumbering) -> Self {
        self.list_numbering = numbering;
        self
    }

    /// Enable or disable the title heading.
    pub fn with_title_heading(mut self, enabled: bool) -> Self {
        self.title_heading = enabled;
        self
    }

    /// Set the alt text for image references.
    pub fn with_image_alt(mut self, alt: impl Into<String>) -> Self {
        self.image_alt = alt.into();
        self
    }

    /// Enable lenient mode (skip unclassifiable fragments).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            short_text_threshold: DEFAULT_SHORT_TEXT_THRESHOLD,
            heading_level_default: DEFAULT_HEADING_LEVEL,
            list_numbering: ListNumbering::Literal,
            title_heading: true,
            image_alt: "图片".to_string(),
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// Numbering of ordered list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListNumbering {
    /// Every ordered item renders as `1. `
    #[default]
    Literal,
    /// Items are numbered 1, 2, 3, ... within a run of ordered items
    Sequential,
}

/// Error handling mode for fragments that cannot be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the document
    #[default]
    Strict,
    /// Drop the fragment and continue
    Lenient,
}
