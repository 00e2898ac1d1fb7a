//! Description field that grows with its content.

/// Rendered height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Height {
    #[default]
    Auto,
    Px(u32),
}

/// Measures the scroll height of a text area.
pub trait Measure {
    /// Content height in pixels, never less than the current explicit height.
    fn scroll_height(&self, area: &TextArea) -> u32;
}

/// Fixed-width text layout: wraps by columns, fixed line height.
#[derive(Debug, Clone, Copy)]
pub struct LineMeasure {
    pub columns: usize,
    pub line_height_px: u32,
    pub padding_px: u32,
}

impl Default for LineMeasure {
    fn default() -> Self {
        Self {
            columns: 60,
            line_height_px: 20,
            padding_px: 16,
        }
    }
}

impl LineMeasure {
    fn line_count(&self, text: &str) -> u32 {
        let columns = self.columns.max(1);
        text.split('\n')
            .map(|line| {
                let lines = line.chars().count().div_ceil(columns).max(1);
                u32::try_from(lines).unwrap_or(u32::MAX)
            })
            .fold(0, u32::saturating_add)
    }
}

impl Measure for LineMeasure {
    fn scroll_height(&self, area: &TextArea) -> u32 {
        // Saturates at u32::MAX instead of wrapping.
        let content = self
            .line_count(&area.value)
            .saturating_mul(self.line_height_px)
            .saturating_add(self.padding_px);
        match area.height {
            Height::Auto => content,
            Height::Px(current) => content.max(current),
        }
    }
}

/// Multi-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextArea {
    pub value: String,
    pub height: Height,
}

impl TextArea {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            height: Height::Auto,
        }
    }
}

/// Fit the area's height to its content.
///
/// The height is reset to `Auto` first so the area can also shrink.
pub fn autogrow(area: &mut TextArea, measure: &dyn Measure) {
    area.height = Height::Auto;
    area.height = Height::Px(measure.scroll_height(area));
}
