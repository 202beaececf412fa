//! Codepage handling for field text.
//!
//! All byte-to-text and text-to-byte conversion in the codec goes through
//! `TextEncoding`, so field parsing and serialization never see raw codepage
//! details and adding a codepage never touches them. Field `length` is always
//! a byte count; for the single-byte codepages here one byte is one character,
//! while `Utf8` spans may decode to fewer characters than bytes.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::FixrecError;

mod tables;

/// A supported character set for field text.
///
/// The serde identifiers (`"ascii"`, `"utf8"`, `"latin1"`, `"cp037"`,
/// `"cp500"`) are the values accepted in caller configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// 7-bit ASCII. Bytes above 0x7F fail to decode. This is the default.
    #[default]
    Ascii,
    /// UTF-8. The only multi-byte codepage currently supported.
    #[serde(alias = "utf-8")]
    Utf8,
    /// ISO-8859-1. Total: every byte maps to U+0000..=U+00FF.
    #[serde(alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
    /// IBM EBCDIC codepage 037 (USA/Canada).
    #[serde(alias = "ibm037")]
    Cp037,
    /// IBM EBCDIC codepage 500 (International).
    #[serde(alias = "ibm500", alias = "ebcdic-cp-500")]
    Cp500,
}

impl TextEncoding {
    /// The canonical name used in error messages and logged configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf8",
            Self::Latin1 => "latin1",
            Self::Cp037 => "cp037",
            Self::Cp500 => "cp500",
        }
    }

    /// Decodes a field span into text under this codepage.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, FixrecError> {
        match self {
            Self::Ascii => {
                if let Some(bad) = bytes.iter().find(|b| !b.is_ascii()) {
                    return Err(self.decode_error(format!("non-ASCII byte 0x{:02X}", bad)));
                }
                // Validated above: every byte is 7-bit.
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| self.decode_error(e.to_string())),
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Self::Cp037 => Ok(bytes
                .iter()
                .map(|&b| tables::CP037_TO_UNICODE[b as usize])
                .collect()),
            Self::Cp500 => Ok(bytes
                .iter()
                .map(|&b| tables::CP500_TO_UNICODE[b as usize])
                .collect()),
        }
    }

    /// Encodes text into exactly the bytes a decoder under the same codepage
    /// would reverse. Characters outside the codepage are an error, never
    /// substituted.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, FixrecError> {
        match self {
            Self::Ascii => text
                .chars()
                .map(|c| {
                    if c.is_ascii() {
                        Ok(c as u8)
                    } else {
                        Err(self.encode_error(c))
                    }
                })
                .collect(),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    let cp = c as u32;
                    if cp <= 0xFF {
                        Ok(cp as u8)
                    } else {
                        Err(self.encode_error(c))
                    }
                })
                .collect(),
            Self::Cp037 => encode_via_table(text, cp037_reverse(), self),
            Self::Cp500 => encode_via_table(text, cp500_reverse(), self),
        }
    }

    fn decode_error(&self, reason: String) -> FixrecError {
        FixrecError::Encoding {
            codepage: self.name().to_string(),
            reason,
        }
    }

    fn encode_error(&self, c: char) -> FixrecError {
        FixrecError::Encoding {
            codepage: self.name().to_string(),
            reason: format!("character {:?} is not representable", c),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn encode_via_table(
    text: &str,
    reverse: &HashMap<char, u8>,
    encoding: &TextEncoding,
) -> Result<Vec<u8>, FixrecError> {
    text.chars()
        .map(|c| reverse.get(&c).copied().ok_or_else(|| encoding.encode_error(c)))
        .collect()
}

fn build_reverse(table: &[char; 256]) -> HashMap<char, u8> {
    let mut map = HashMap::with_capacity(256);
    for (byte, &ch) in table.iter().enumerate() {
        map.insert(ch, byte as u8);
    }
    map
}

fn cp037_reverse() -> &'static HashMap<char, u8> {
    static REVERSE: OnceLock<HashMap<char, u8>> = OnceLock::new();
    REVERSE.get_or_init(|| build_reverse(&tables::CP037_TO_UNICODE))
}

fn cp500_reverse() -> &'static HashMap<char, u8> {
    static REVERSE: OnceLock<HashMap<char, u8>> = OnceLock::new();
    REVERSE.get_or_init(|| build_reverse(&tables::CP500_TO_UNICODE))
}
