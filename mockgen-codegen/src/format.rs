//! Source formatters applied to the assembled mock file.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use mockgen_model::FormatterKind;
use thiserror::Error;

/// Normalizes generated Go source before it is written.
pub trait SourceFormatter {
    /// Short name used in logs (e.g., "canonical").
    fn name(&self) -> &'static str;

    /// Format `src`, failing if it is not well-formed Go text.
    fn format(&self, src: &str) -> Result<String, FormatError>;
}

/// Errors that can occur while formatting generated source.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("generated source is malformed at line {line}: {message}")]
    Malformed {
        line: usize,
        message: String,
        source_text: String,
    },

    #[error("failed to run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` rejected the generated source: {stderr}")]
    Rejected {
        program: String,
        stderr: String,
        source_text: String,
    },
}

impl FormatError {
    /// The unformatted text that failed, when available.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Self::Malformed { source_text, .. } | Self::Rejected { source_text, .. } => {
                Some(source_text)
            }
            Self::Spawn { .. } => None,
        }
    }
}

/// Build the formatter selected by `kind`.
pub fn formatter_for(kind: FormatterKind) -> Box<dyn SourceFormatter> {
    match kind {
        FormatterKind::Canonical => Box::new(Canonical),
        FormatterKind::Gofmt => Box::new(Gofmt::new()),
    }
}

/// Built-in formatter producing gofmt-style layout for generated code.
///
/// Checks that brackets balance outside literals and comments, re-indents
/// every line with tabs by bracket depth, aligns field types inside
/// `struct { }` blocks, strips trailing whitespace and collapses runs of
/// blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonical;

impl SourceFormatter for Canonical {
    fn name(&self) -> &'static str {
        "canonical"
    }

    fn format(&self, src: &str) -> Result<String, FormatError> {
        let mut lines = reindent(src)?;
        align_struct_fields(&mut lines);
        Ok(join_lines(&lines))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    BlockComment,
    Str,
    RawStr,
    Rune,
}

#[derive(Debug)]
struct Open {
    delim: char,
    line: usize,
}

#[derive(Debug)]
struct Line {
    depth: usize,
    text: String,
    /// Inside a raw string literal; emitted untouched.
    verbatim: bool,
}

fn malformed(line: usize, message: String, src: &str) -> FormatError {
    FormatError::Malformed {
        line,
        message,
        source_text: src.to_string(),
    }
}

fn reindent(src: &str) -> Result<Vec<Line>, FormatError> {
    let mut state = Lex::Code;
    let mut stack: Vec<Open> = Vec::new();
    let mut lines = Vec::new();
    let mut line_no = 0;

    for raw in src.lines() {
        line_no += 1;
        if state == Lex::RawStr {
            lines.push(Line {
                depth: 0,
                text: raw.to_string(),
                verbatim: true,
            });
        } else {
            let text = raw.trim();
            let closers = if state == Lex::Code {
                leading_closers(text)
            } else {
                0
            };
            lines.push(Line {
                depth: stack.len().saturating_sub(closers),
                text: text.to_string(),
                verbatim: false,
            });
        }
        state = scan_line(raw, line_no, state, &mut stack)
            .map_err(|message| malformed(line_no, message, src))?;
    }

    match state {
        Lex::RawStr => {
            return Err(malformed(
                line_no,
                "unterminated raw string literal".to_string(),
                src,
            ));
        }
        Lex::BlockComment => {
            return Err(malformed(
                line_no,
                "unterminated block comment".to_string(),
                src,
            ));
        }
        _ => {}
    }

    if let Some(open) = stack.last() {
        return Err(malformed(
            open.line,
            format!("unclosed '{}'", open.delim),
            src,
        ));
    }

    Ok(lines)
}

fn leading_closers(text: &str) -> usize {
    text.chars()
        .take_while(|c| matches!(c, ')' | ']' | '}'))
        .count()
}

fn opener_for(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

/// Advance the lexer over one line, tracking open brackets.
fn scan_line(
    line: &str,
    line_no: usize,
    mut state: Lex,
    stack: &mut Vec<Open>,
) -> Result<Lex, String> {
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            Lex::Code => match c {
                '/' if chars.peek() == Some(&'/') => return Ok(Lex::Code),
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Lex::BlockComment;
                }
                '"' => state = Lex::Str,
                '`' => state = Lex::RawStr,
                '\'' => state = Lex::Rune,
                '(' | '[' | '{' => stack.push(Open {
                    delim: c,
                    line: line_no,
                }),
                ')' | ']' | '}' => match stack.pop() {
                    Some(open) if open.delim == opener_for(c) => {}
                    Some(open) => {
                        return Err(format!(
                            "mismatched '{}', '{}' from line {} is still open",
                            c, open.delim, open.line
                        ));
                    }
                    None => return Err(format!("unexpected '{}'", c)),
                },
                _ => {}
            },
            Lex::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Lex::Code;
                }
            }
            Lex::Str | Lex::Rune => {
                let quote = if state == Lex::Str { '"' } else { '\'' };
                if c == '\\' {
                    chars.next();
                } else if c == quote {
                    state = Lex::Code;
                }
            }
            Lex::RawStr => {
                if c == '`' {
                    state = Lex::Code;
                }
            }
        }
    }

    match state {
        Lex::Str => Err("unterminated string literal".to_string()),
        Lex::Rune => Err("unterminated rune literal".to_string()),
        other => Ok(other),
    }
}

fn is_struct_open(line: &Line) -> bool {
    !line.verbatim && line.text.ends_with("struct {")
}

fn field_parts(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() || text.starts_with("//") || text.starts_with('}') {
        return None;
    }
    text.split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim_start()))
}

/// Pad field names so types in consecutive struct fields share a column.
fn align_struct_fields(lines: &mut [Line]) {
    for open in 0..lines.len() {
        if !is_struct_open(&lines[open]) {
            continue;
        }
        let depth = lines[open].depth;
        let mut run: Vec<usize> = Vec::new();
        let mut i = open + 1;
        while i < lines.len() {
            let line = &lines[i];
            if !line.verbatim && line.depth == depth && line.text.starts_with('}') {
                break;
            }
            let is_field = !line.verbatim
                && line.depth == depth + 1
                && field_parts(&line.text).is_some();
            if is_field {
                run.push(i);
            } else {
                align_run(lines, &run);
                run.clear();
            }
            i += 1;
        }
        align_run(lines, &run);
    }
}

fn align_run(lines: &mut [Line], run: &[usize]) {
    let width = run
        .iter()
        .filter_map(|&i| field_parts(&lines[i].text))
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    for &i in run {
        let aligned = match field_parts(&lines[i].text) {
            Some((name, rest)) => {
                let pad = width - name.chars().count() + 1;
                format!("{}{}{}", name, " ".repeat(pad), rest)
            }
            None => continue,
        };
        lines[i].text = aligned;
    }
}

fn join_lines(lines: &[Line]) -> String {
    let mut out = String::new();
    let mut pending_blank = false;
    for line in lines {
        if !line.verbatim && line.text.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        if line.verbatim {
            out.push_str(&line.text);
        } else {
            out.push_str(&"\t".repeat(line.depth));
            out.push_str(&line.text);
        }
        out.push('\n');
    }
    out
}

/// Formatter that pipes source through an external `gofmt` binary.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
}

impl Gofmt {
    /// Use `gofmt` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("gofmt")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for Gofmt {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFormatter for Gofmt {
    fn name(&self) -> &'static str {
        "gofmt"
    }

    fn format(&self, src: &str) -> Result<String, FormatError> {
        let spawn_error = |source| FormatError::Spawn {
            program: self.program_name(),
            source,
        };

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(src.as_bytes()).map_err(spawn_error)?;
        }
        let output = child.wait_with_output().map_err(spawn_error)?;

        if !output.status.success() {
            return Err(FormatError::Rejected {
                program: self.program_name(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                source_text: src.to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| FormatError::Rejected {
            program: self.program_name(),
            stderr: e.to_string(),
            source_text: src.to_string(),
        })
    }
}
