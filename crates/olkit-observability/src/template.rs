// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Line templates for channel handlers.
//!
//! Templates use `{field}` placeholders. Printf-style `%(field)s` placeholders
//! are accepted as well so existing format strings carry over unchanged.
//! `{{`, `}}` and `%%` produce literal characters.
//!
//! | placeholder | value |
//! |-------------|-------|
//! | `asctime`   | local timestamp, `YYYY-MM-DD HH:MM:SS,mmm` |
//! | `name`      | dotted channel name of the record |
//! | `levelname` | severity name |
//! | `levelno`   | numeric severity |
//! | `message`   | message plus any structured fields |
//! | `lineno`    | source line, empty when unknown |

use crate::config::LogError;
use crate::level::Severity;
use chrono::{DateTime, Local};

/// Template used when none is configured
pub const DEFAULT_TEMPLATE: &str = "{asctime} - {name} - {levelname} - {message}";

const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Asctime,
    Name,
    LevelName,
    LevelNo,
    Message,
    LineNo,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "asctime" => Some(Field::Asctime),
            "name" => Some(Field::Name),
            "levelname" => Some(Field::LevelName),
            "levelno" => Some(Field::LevelNo),
            "message" => Some(Field::Message),
            "lineno" => Some(Field::LineNo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// One formatted log record
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    /// Local time of the record
    pub timestamp: DateTime<Local>,
    /// Dotted channel name
    pub name: &'a str,
    /// Record severity
    pub severity: Severity,
    /// Rendered message
    pub message: &'a str,
    /// Source line, when known
    pub line: Option<u32>,
}

/// A parsed line template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl Default for LogTemplate {
    fn default() -> Self {
        // The default template is known to parse
        LogTemplate::parse(DEFAULT_TEMPLATE).unwrap_or_else(|_| LogTemplate {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![Segment::Field(Field::Message)],
        })
    }
}

impl LogTemplate {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, LogError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '%' if chars.peek() == Some(&'%') => {
                    chars.next();
                    literal.push('%');
                }
                '{' => {
                    let name = take_until(&mut chars, '}', source)?;
                    flush_literal(&mut literal, &mut segments);
                    segments.push(Segment::Field(field_named(&name, source)?));
                }
                '%' if chars.peek() == Some(&'(') => {
                    chars.next();
                    let name = take_until(&mut chars, ')', source)?;
                    // Conversion character, e.g. the `s` in `%(message)s`
                    match chars.next() {
                        Some('s') | Some('d') => {}
                        _ => {
                            return Err(LogError::InvalidFormat(format!(
                                "missing conversion after %({}) in '{}'",
                                name, source
                            )))
                        }
                    }
                    flush_literal(&mut literal, &mut segments);
                    segments.push(Segment::Field(field_named(&name, source)?));
                }
                '}' => {
                    return Err(LogError::InvalidFormat(format!(
                        "unmatched '}}' in '{}'",
                        source
                    )))
                }
                other => literal.push(other),
            }
        }
        flush_literal(&mut literal, &mut segments);

        Ok(LogTemplate {
            source: source.to_string(),
            segments,
        })
    }

    /// The template as it was given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render a record into a single line (without trailing newline)
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + record.message.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Asctime) => {
                    out.push_str(&record.timestamp.format(ASCTIME_FORMAT).to_string())
                }
                Segment::Field(Field::Name) => out.push_str(record.name),
                Segment::Field(Field::LevelName) => out.push_str(record.severity.name()),
                Segment::Field(Field::LevelNo) => {
                    out.push_str(&record.severity.as_number().to_string())
                }
                Segment::Field(Field::Message) => out.push_str(record.message),
                Segment::Field(Field::LineNo) => {
                    if let Some(line) = record.line {
                        out.push_str(&line.to_string());
                    }
                }
            }
        }
        out
    }
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn take_until(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    close: char,
    source: &str,
) -> Result<String, LogError> {
    let mut name = String::new();
    for c in chars.by_ref() {
        if c == close {
            return Ok(name);
        }
        name.push(c);
    }
    Err(LogError::InvalidFormat(format!(
        "unterminated placeholder '{}' in '{}'",
        name, source
    )))
}

fn field_named(name: &str, source: &str) -> Result<Field, LogError> {
    Field::parse(name.trim()).ok_or_else(|| {
        LogError::InvalidFormat(format!(
            "unknown placeholder '{}' in '{}'. Expected one of: asctime, name, levelname, levelno, message, lineno",
            name, source
        ))
    })
}
