/// 1-based line and column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub col: usize,
}

/// Line start offsets of a script, for turning error spans into positions.
#[derive(Debug, Clone)]
pub struct SourceMap {
    line_offsets: Vec<usize>,
}

impl SourceMap {
    pub fn from_source(source: &str) -> Self {
        let mut line_offsets = vec![0];
        for (idx, ch) in source.char_indices() {
            if ch == '\n' {
                line_offsets.push(idx + 1);
            }
        }
        Self { line_offsets }
    }

    pub fn byte_to_pos(&self, byte: usize) -> SourcePos {
        let line_idx = match self.line_offsets.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_offsets.get(line_idx).copied().unwrap_or(0);
        SourcePos {
            line: line_idx + 1,
            col: byte.saturating_sub(line_start) + 1,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line_text<'src>(&self, source: &'src str, line: usize) -> Option<&'src str> {
        let start = *self.line_offsets.get(line.checked_sub(1)?)?;
        let end = self
            .line_offsets
            .get(line)
            .map_or(source.len(), |next| next - 1);
        source
            .get(start..end)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let map = SourceMap::from_source("let a = deferred();\na.resolve(1);");
        assert_eq!(map.byte_to_pos(0), SourcePos { line: 1, col: 1 });
        assert_eq!(map.byte_to_pos(20), SourcePos { line: 2, col: 1 });
        assert_eq!(map.byte_to_pos(22), SourcePos { line: 2, col: 3 });
        assert_eq!(map.line_count(), 2);
    }

    #[test]
    fn line_text_strips_terminators() {
        let source = "first\r\nsecond\nthird";
        let map = SourceMap::from_source(source);
        assert_eq!(map.line_text(source, 1), Some("first"));
        assert_eq!(map.line_text(source, 2), Some("second"));
        assert_eq!(map.line_text(source, 3), Some("third"));
        assert_eq!(map.line_text(source, 0), None);
        assert_eq!(map.line_text(source, 4), None);
    }
}
