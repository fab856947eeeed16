//! Plain text files as scrollable lines.

use super::SourceError;
use crate::view_state::ContentExtent;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Tab stop interval in display cells.
pub const TAB_WIDTH: usize = 8;

/// Lines of a text file, tabs expanded, with their widest display width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContent {
    lines: Vec<String>,
    width: usize,
}

impl TextContent {
    /// Read every line of a file.
    ///
    /// # Errors
    /// Returns `SourceError::FileNotFound` or `SourceError::Io`.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| SourceError::io(path, e))
    }

    /// Read lines from any buffered reader.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; `\n` and `\r\n`
    /// endings are both stripped.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut content = Self::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            content.push_line(&String::from_utf8_lossy(&buf));
        }
        Ok(content)
    }

    /// Split an in-memory string into lines.
    pub fn from_text(text: &str) -> Self {
        let mut content = Self::default();
        for line in text.lines() {
            content.push_line(line);
        }
        content
    }

    fn push_line(&mut self, line: &str) {
        let line = expand_tabs(line);
        self.width = self.width.max(line.width());
        self.lines.push(line);
    }

    /// All lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Widest line, in display cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of lines.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Content size to hand to a scroller.
    pub fn extent(&self) -> ContentExtent {
        ContentExtent::new(self.width, self.lines.len())
    }
}

/// Replace tabs with spaces up to the next [`TAB_WIDTH`] stop.
pub fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(ch);
            column += ch.width().unwrap_or(0);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tabs_expand_to_next_stop() {
        assert_eq!(expand_tabs("a\tb"), "a       b");
        assert_eq!(expand_tabs("\t"), " ".repeat(8));
        assert_eq!(expand_tabs("12345678\tx"), format!("12345678{}x", " ".repeat(8)));
    }

    #[test]
    fn width_is_widest_line_in_cells() {
        let content = TextContent::from_text("ab\n漢字漢\nc");
        assert_eq!(content.height(), 3);
        assert_eq!(content.width(), 6);
        assert_eq!(content.extent(), ContentExtent::new(6, 3));
    }

    #[test]
    fn reader_strips_crlf_and_replaces_bad_utf8() {
        let bytes = b"one\r\ntw\xffo\nthree".to_vec();
        let content = TextContent::from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(content.lines()[0], "one");
        assert_eq!(content.lines()[1], "tw\u{fffd}o");
        assert_eq!(content.lines()[2], "three");
    }

    #[test]
    fn empty_input_has_no_lines() {
        let content = TextContent::from_reader(Cursor::new(Vec::new())).unwrap();
        assert_eq!(content.height(), 0);
        assert_eq!(content.width(), 0);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = TextContent::load(Path::new("/nonexistent/vport/text.txt"));
        assert!(matches!(result, Err(SourceError::FileNotFound { .. })));
    }
}
