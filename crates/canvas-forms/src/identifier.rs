//! Field identifier normalization
//!
//! Author-supplied field names become DOM/URL-safe keys that address a
//! field's value in the state store and in the submission payload.

use crate::error::FormError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

fn non_alphanumeric() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[^a-z0-9]+").expect("static pattern"))
}

/// Character that replaces runs of non-alphanumeric characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    #[default]
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = "_")]
    Underscore,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Dash => '-',
            Separator::Underscore => '_',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Separator {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Separator::Dash),
            "_" => Ok(Separator::Underscore),
            other => Err(FormError::Config(format!("unsupported separator: {:?}", other))),
        }
    }
}

/// Lower-case `name`, collapse every run of characters outside `[a-z0-9]`
/// into one separator and trim separators from both ends.
pub fn sanitize_name(name: &str, separator: Separator) -> String {
    let lowered = name.to_lowercase();
    let mut buf = [0u8; 4];
    let sep: &str = separator.as_char().encode_utf8(&mut buf);
    non_alphanumeric()
        .replace_all(&lowered, sep)
        .trim_matches(separator.as_char())
        .to_string()
}

/// Source of fallback identifiers for unnamed fields
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... tokens
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// Turns raw field names into identifiers.
///
/// Names that are absent, empty, or contain nothing alphanumeric get a fresh
/// token from the generator. Tokens are sanitized too, so normalizing an
/// identifier a second time returns it unchanged.
#[derive(Clone)]
pub struct IdentifierNormalizer {
    separator: Separator,
    generator: Arc<dyn IdGenerator>,
}

impl IdentifierNormalizer {
    pub fn new(separator: Separator, generator: Arc<dyn IdGenerator>) -> Self {
        Self { separator, generator }
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn normalize(&self, raw: Option<&str>) -> String {
        let sanitized = raw
            .map(|name| sanitize_name(name, self.separator))
            .unwrap_or_default();
        if !sanitized.is_empty() {
            return sanitized;
        }

        loop {
            let token = sanitize_name(&self.generator.generate(), self.separator);
            if !token.is_empty() {
                return token;
            }
        }
    }
}

impl Default for IdentifierNormalizer {
    fn default() -> Self {
        Self::new(Separator::Dash, Arc::new(UuidGenerator))
    }
}

impl fmt::Debug for IdentifierNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierNormalizer")
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}
