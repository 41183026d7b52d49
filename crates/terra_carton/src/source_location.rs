//! Byte offset to line/column mapping.

/// Line start table for a source text.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i as u32 + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines in the source.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the 1-based (line, column) of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map_or(offset as usize - line_start, |text| text.chars().count());
        (line as u32 + 1, column as u32 + 1)
    }

    /// Get the byte offset where the line containing `offset` starts.
    pub fn line_start(&self, offset: u32) -> u32 {
        let offset = offset.min(self.source.len() as u32);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => self.line_starts[line],
            Err(next) => self.line_starts[next - 1],
        }
    }

    /// Leading whitespace of the line containing `offset`.
    pub fn indentation(&self, offset: u32) -> &'a str {
        let start = self.line_start(offset) as usize;
        let line = &self.source[start..];
        let end = line
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(line.len());
        &line[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(1), (1, 2));
        assert_eq!(index.line_col(3), (2, 1));
        assert_eq!(index.line_col(6), (3, 1));
        assert_eq!(index.line_col(8), (4, 2));
        assert_eq!(index.line_col(100), (4, 3));
    }

    #[test]
    fn test_multibyte_columns() {
        let index = LineIndex::new("é = 'x';");
        // 'é' is two bytes, one character
        assert_eq!(index.line_col(2), (1, 2));
    }

    #[test]
    fn test_indentation() {
        let source = "describe('a', () => {\n    Terra.it.isAccessible();\n});";
        let index = LineIndex::new(source);
        let offset = source.find("Terra").unwrap() as u32;
        assert_eq!(index.indentation(offset), "    ");
        assert_eq!(index.indentation(0), "");
    }
}
