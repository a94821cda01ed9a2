//! Indented line writer.

/// Spaces per nesting level.
pub(crate) const INDENT: usize = 2;

/// Collects output lines, indenting each by the current section depth.
///
/// Blank lines stay empty whatever the depth.
#[derive(Debug, Default)]
pub(crate) struct UsageWriter {
    depth: usize,
    lines: Vec<String>,
}

impl UsageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref().trim_end();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", " ".repeat(self.indent_width()), text));
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Writes a titled section whose body is nested one level deeper.
    pub fn section<F>(&mut self, title: &str, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(title);
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    /// Width of the indentation applied to the next line.
    pub fn indent_width(&self) -> usize {
        self.depth * INDENT
    }

    pub fn finish(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sections_indent_bodies() {
        let mut writer = UsageWriter::new();
        writer.line("top");
        writer.section("Commands", |w| {
            w.section("Users", |w| w.line("row"));
            w.line("after");
        });
        writer.line("bottom");

        assert_eq!(
            writer.finish(),
            vec!["top", "Commands", "  Users", "    row", "  after", "bottom"]
        );
    }

    #[test]
    fn blank_lines_have_no_indent() {
        let mut writer = UsageWriter::new();
        writer.section("Errors", |w| {
            w.blank();
            w.line("   ");
        });
        assert_eq!(writer.finish(), vec!["Errors", "", ""]);
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let mut writer = UsageWriter::new();
        writer.line("row   ");
        assert_eq!(writer.finish(), vec!["row"]);
    }
}
