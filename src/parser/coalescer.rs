//! Short-text coalescing.
//!
//! Consecutive short plain-text units are buffered and merged into one
//! paragraph once enough text has accumulated. Any structural unit (or a
//! blank) flushes the buffer before being forwarded, so merged text never
//! crosses a heading, list, table or blank line.

use crate::model::StructuralUnit;

/// Separator placed between merged fragments.
const FRAGMENT_SEPARATOR: &str = " ";

/// Short fragments waiting to be merged.
#[derive(Debug, Clone, Default)]
pub struct PendingBuffer {
    fragments: Vec<String>,
}

impl PendingBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment.
    pub fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Check if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of buffered fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Join the buffered fragments plus an optional final one, clearing
    /// the buffer.
    pub fn combine(&mut self, last: Option<String>) -> String {
        let mut fragments = std::mem::take(&mut self.fragments);
        fragments.extend(last);
        fragments.join(FRAGMENT_SEPARATOR)
    }
}

/// Streaming short-text coalescer.
#[derive(Debug, Clone)]
pub struct Coalescer {
    threshold: usize,
    pending: PendingBuffer,
}

impl Coalescer {
    /// Create a coalescer with a threshold in characters.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            pending: PendingBuffer::new(),
        }
    }

    /// Check if text is below the threshold (trimmed, counted in chars).
    pub fn is_short(&self, text: &str) -> bool {
        text.trim().chars().count() < self.threshold
    }

    /// Feed one unit, appending whatever becomes ready to `out`.
    pub fn push(&mut self, unit: StructuralUnit, out: &mut Vec<StructuralUnit>) {
        if unit.is_boundary() {
            self.flush_into(out);
            out.push(unit);
            return;
        }

        if let StructuralUnit::PlainText { text } = unit {
            let text = text.trim().to_string();
            if self.is_short(&text) {
                self.pending.push(text);
            } else {
                out.push(StructuralUnit::plain(self.pending.combine(Some(text))));
            }
        }
    }

    /// Emit any buffered text as one plain-text unit.
    pub fn flush(&mut self) -> Option<StructuralUnit> {
        if self.pending.is_empty() {
            return None;
        }
        Some(StructuralUnit::plain(self.pending.combine(None)))
    }

    /// Flush at end of stream.
    pub fn finish(mut self, out: &mut Vec<StructuralUnit>) {
        self.flush_into(out);
    }

    fn flush_into(&mut self, out: &mut Vec<StructuralUnit>) {
        if let Some(unit) = self.flush() {
            out.push(unit);
        }
    }
}

/// Coalesce a whole unit stream.
pub fn coalesce(units: impl IntoIterator<Item = StructuralUnit>, threshold: usize) -> Vec<StructuralUnit> {
    let mut coalescer = Coalescer::new(threshold);
    let mut out = Vec::new();
    for unit in units {
        coalescer.push(unit, &mut out);
    }
    coalescer.finish(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_fragments_merge_into_long() {
        let units = vec![
            StructuralUnit::plain("短"),
            StructuralUnit::plain("这是一段足够长的正文内容用于触发输出"),
        ];
        let out = coalesce(units, 10);
        assert_eq!(
            out,
            vec![StructuralUnit::plain("短 这是一段足够长的正文内容用于触发输出")]
        );
    }

    #[test]
    fn test_threshold_counts_chars_not_bytes() {
        let coalescer = Coalescer::new(5);
        // 4 CJK characters are 12 bytes but still short
        assert!(coalescer.is_short("一二三四"));
        assert!(!coalescer.is_short("一二三四五"));
        assert!(coalescer.is_short("  ab  "));
    }

    #[test]
    fn test_boundary_flushes_before_forwarding() {
        let units = vec![
            StructuralUnit::plain("a"),
            StructuralUnit::plain("b"),
            StructuralUnit::heading(1, "H"),
            StructuralUnit::plain("c"),
        ];
        let out = coalesce(units, 20);
        assert_eq!(
            out,
            vec![
                StructuralUnit::plain("a b"),
                StructuralUnit::heading(1, "H"),
                StructuralUnit::plain("c"),
            ]
        );
    }

    #[test]
    fn test_blank_flushes() {
        let units = vec![
            StructuralUnit::plain("a"),
            StructuralUnit::Blank,
            StructuralUnit::plain("b"),
        ];
        let out = coalesce(units, 20);
        assert_eq!(
            out,
            vec![
                StructuralUnit::plain("a"),
                StructuralUnit::Blank,
                StructuralUnit::plain("b"),
            ]
        );
    }

    #[test]
    fn test_zero_threshold_passes_through() {
        let units = vec![StructuralUnit::plain("a"), StructuralUnit::plain("b")];
        let out = coalesce(units.clone(), 0);
        assert_eq!(out, units);
    }

    #[test]
    fn test_flush_on_empty_buffer() {
        let mut coalescer = Coalescer::new(20);
        assert!(coalescer.flush().is_none());
        let mut out = Vec::new();
        coalescer.push(StructuralUnit::plain("x"), &mut out);
        assert!(out.is_empty());
        assert_eq!(coalescer.flush(), Some(StructuralUnit::plain("x")));
    }
}
