//! Code builder utility for generating properly indented Go code.

/// Append-only buffer of Go source lines with a current indentation depth.
///
/// # Example
///
/// ```
/// use mockgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder.push_block("func main() {", |b| {
///     b.push_line("fmt.Println(\"Hello\")");
/// });
///
/// assert_eq!(builder.build(), "func main() {\n\tfmt.Println(\"Hello\")\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: &'static str,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder indenting with the given unit.
    pub fn new(indent: &'static str) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation (Go default).
    pub fn go() -> Self {
        Self::new("\t")
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add a `//` comment line.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("// ");
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add `header`, an indented body, and a closing `}` line.
    pub fn push_block<F>(&mut self, header: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_block_with_close(header, "}", body)
    }

    /// Add `header`, an indented body, and a custom closing line.
    pub fn push_block_with_close<F>(&mut self, header: &str, close: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header).push_indent();
        body(self);
        self.push_dedent().push_line(close)
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::go()
    }
}
