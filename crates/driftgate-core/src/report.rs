//! Reporting sink contract and the run summary document.

use crate::error::Result;

/// Destination for grouped logs, leveled annotations, machine-readable
/// outputs, and the run summary.
///
/// The production implementation is
/// [`GithubReporter`](crate::actions::GithubReporter); tests substitute
/// [`RecordingReporter`](crate::fakes::RecordingReporter).
pub trait Reporter {
    /// Open a named, collapsible log section.
    fn start_group(&mut self, title: &str);

    /// Close the innermost open section.
    fn end_group(&mut self);

    /// Plain log line, no annotation level.
    fn log(&mut self, message: &str);

    fn notice(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);

    /// Expose a key/value pair to downstream automation.
    fn set_output(&mut self, key: &str, value: &str) -> Result<()>;

    /// Publish the run summary document. Written once per run outcome.
    fn write_summary(&mut self, summary: &Summary) -> Result<()>;

    /// Fatal-failure signal: the error-level annotation attached to the
    /// run's non-zero exit. The dispatcher owns the exit itself.
    fn fail(&mut self, message: &str);
}

/// Markdown builder for the run summary document.
///
/// Supports the block types the reporting sink accepts: headings, raw
/// text, bulleted lists, and labeled code blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    buffer: String,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heading at the given level (clamped to 1..=6).
    pub fn heading(mut self, level: u8, text: &str) -> Self {
        let level = usize::from(level.clamp(1, 6));
        self.buffer.push_str(&"#".repeat(level));
        self.buffer.push(' ');
        self.buffer.push_str(text);
        self.buffer.push_str("\n\n");
        self
    }

    /// Raw text block.
    pub fn text(mut self, text: &str) -> Self {
        self.buffer.push_str(text);
        self.buffer.push_str("\n\n");
        self
    }

    /// Bulleted list, one item per entry.
    pub fn list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.buffer.push_str("- ");
            self.buffer.push_str(item.as_ref());
            self.buffer.push('\n');
        }
        self.buffer.push('\n');
        self
    }

    /// Fenced code block with a language hint.
    pub fn code_block(mut self, lang: &str, code: &str) -> Self {
        self.buffer.push_str("```");
        self.buffer.push_str(lang);
        self.buffer.push('\n');
        self.buffer.push_str(code);
        if !code.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer.push_str("```\n\n");
        self
    }

    /// Rendered markdown.
    pub fn as_markdown(&self) -> &str {
        &self.buffer
    }
}
