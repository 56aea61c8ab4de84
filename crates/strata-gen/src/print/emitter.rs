//! Line-oriented output buffer for rendered artifacts.

/// Accumulates generated text line by line with four-space indentation.
///
/// `finish` normalizes the tail to exactly one newline, so re-rendering an
/// unchanged plan yields byte-identical text and splices stay idempotent.
#[derive(Debug, Default)]
pub struct Emitter {
    output: String,
    indent: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one line at the current indentation. Empty text becomes a
    /// blank line with no trailing spaces.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Pushes an opening line and indents what follows.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedents, pushes a continuation line, and indents again. For
    /// `} else if ... {` and friends.
    pub fn chain(&mut self, text: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.open(text);
    }

    /// Dedents and pushes the closing line.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    pub fn finish(mut self) -> String {
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        self.output
    }
}
