//! Reads the list files written by external listing commands.

use std::fs;
use std::io;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Crlf,
    Lf,
    Cr,
}

impl Newline {
    /// First line terminator found in `text`; `Lf` when there is none.
    pub fn detect(text: &str) -> Self {
        match text.find(['\r', '\n']) {
            Some(index) if text[index..].starts_with("\r\n") => Self::Crlf,
            Some(index) if text[index..].starts_with('\r') => Self::Cr,
            _ => Self::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lines {
    pub lines: Vec<String>,
    pub newline: Newline,
}

impl Lines {
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let newline = Newline::detect(text);
        let mut lines: Vec<String> = text.split(newline.as_str()).map(str::to_string).collect();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        Self { lines, newline }
    }
}

pub fn read_lines(path: &Path) -> io::Result<Lines> {
    let data = fs::read(path)?;
    let text = String::from_utf8(data).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(Lines::parse(&text))
}
