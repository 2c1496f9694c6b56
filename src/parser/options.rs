//! Text extraction options.

/// Options for turning PDF pages into text lines.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Which kinds of lines to produce per page
    pub strategy: LineStrategy,

    /// Maximum baseline distance (points) for spans to share a line
    pub y_tolerance: f32,

    /// Normalize extracted text to Unicode NFC
    pub normalize_unicode: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line strategy.
    pub fn with_strategy(mut self, strategy: LineStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Plain text lines only.
    pub fn plain_text(mut self) -> Self {
        self.strategy = LineStrategy::PlainText;
        self
    }

    /// Set the baseline clustering tolerance.
    pub fn with_y_tolerance(mut self, tolerance: f32) -> Self {
        self.y_tolerance = tolerance;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategy: LineStrategy::Combined,
            y_tolerance: 5.0,
            normalize_unicode: true,
        }
    }
}

/// Which lines a backend produces for each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStrategy {
    /// Lines rebuilt from positioned text spans
    Positioned,
    /// The backend's plain text split on line breaks
    PlainText,
    /// Positioned lines followed by plain text lines
    #[default]
    Combined,
}

impl LineStrategy {
    /// Whether positioned lines are produced.
    pub fn positioned(self) -> bool {
        matches!(self, LineStrategy::Positioned | LineStrategy::Combined)
    }

    /// Whether plain text lines are produced.
    pub fn plain(self) -> bool {
        matches!(self, LineStrategy::PlainText | LineStrategy::Combined)
    }
}
