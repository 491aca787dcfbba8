use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source text shared by every node parsed from it.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceBuffer {
    name: Option<PathBuf>,
    text: String,
}

impl SourceBuffer {
    pub fn new(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: None,
            text: text.into(),
        })
    }

    /// A buffer remembering the file it was read from.
    pub fn named(name: impl AsRef<Path>, text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.as_ref().to_path_buf()),
            text: text.into(),
        })
    }

    pub fn name(&self) -> Option<&Path> {
        self.name.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Byte range of a node's expression within its [`SourceBuffer`].
///
/// The range is checked once when the span is created, so slicing it later
/// cannot panic.
#[derive(Debug, Clone)]
pub struct SourceRange {
    buffer: Arc<SourceBuffer>,
    range: Range<usize>,
}

impl SourceRange {
    /// Returns `None` when the range is inverted, past the end of the buffer,
    /// or splits a UTF-8 character.
    pub fn new(buffer: Arc<SourceBuffer>, range: Range<usize>) -> Option<Self> {
        let text = buffer.text();
        if range.start > range.end
            || range.end > text.len()
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            return None;
        }
        Some(Self { buffer, range })
    }

    pub fn buffer(&self) -> &Arc<SourceBuffer> {
        &self.buffer
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn source(&self) -> &str {
        &self.buffer.text()[self.range.clone()]
    }
}

impl PartialEq for SourceRange {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer) && self.range == other.range
    }
}
