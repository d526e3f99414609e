// src/settings.rs
use serde::Serialize;
use std::fmt;

/// Email-domain substrings whose presence marks a row for removal.
pub const DEFAULT_DENYLIST: [&str; 2] = ["@colegiocarbonell.com.br", "@soucarbonell.com.br"];

/// Zero-based position of the email column (the 5th column).
pub const DEFAULT_EMAIL_COLUMN: usize = 4;

/// Zero-based positions dropped by the pruner.
pub const DEFAULT_PRUNED_COLUMNS: [usize; 3] = [0, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    #[serde(rename = "latin-1")]
    Latin1,
    #[serde(rename = "utf-8")]
    Utf8,
}

impl Encoding {
    /// Decode raw file bytes to text. Latin-1 never fails.
    pub fn decode(self, bytes: &[u8]) -> Result<String, std::str::Utf8Error> {
        match self {
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => {
                let text = std::str::from_utf8(bytes)?;
                Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Latin1 => f.write_str("latin-1"),
            Encoding::Utf8 => f.write_str("utf-8"),
        }
    }
}

/// A (delimiter, encoding) pair used to interpret an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dialect {
    #[serde(serialize_with = "ser_delimiter")]
    pub delimiter: u8,
    pub encoding: Encoding,
}

fn ser_delimiter<S: serde::Serializer>(d: &u8, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_char(char::from(*d))
}

impl Dialect {
    pub const SEMICOLON_LATIN1: Dialect = Dialect {
        delimiter: b';',
        encoding: Encoding::Latin1,
    };
    pub const COMMA_UTF8: Dialect = Dialect {
        delimiter: b',',
        encoding: Encoding::Utf8,
    };
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'/{}", char::from(self.delimiter), self.encoding)
    }
}

/// Immutable run configuration. `Settings::default()` carries the production constants;
/// tests build their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Matched case-insensitively as plain substrings of the email text.
    pub denylist: Vec<String>,
    pub email_column: usize,
    pub pruned_columns: Vec<usize>,
    /// Tried in order. All but the last must yield more than one column to be accepted;
    /// the last is the terminal fallback.
    pub dialects: Vec<Dialect>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            email_column: DEFAULT_EMAIL_COLUMN,
            pruned_columns: DEFAULT_PRUNED_COLUMNS.to_vec(),
            dialects: vec![Dialect::SEMICOLON_LATIN1, Dialect::COMMA_UTF8],
        }
    }
}
