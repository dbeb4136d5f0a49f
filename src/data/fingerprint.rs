use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::QuestionRecord;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Content-derived identifier of a stored question.
///
/// Covers the question text, the five options and the explanation, but not
/// the correct index: re-keying an answer keeps the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn for_record(record: &QuestionRecord) -> Self {
        let mut hasher = Fnv1a::new();

        hasher.write_field(&record.question_text);
        for option in &record.options {
            hasher.write_field(option);
        }
        hasher.write_field(&record.explanation);

        Self(format!("{:016x}", hasher.finish()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_ascii_lowercase())
    }
}

/// 64-bit FNV-1a. Fixed constants keep ids stable across builds and
/// toolchains, which `DefaultHasher` does not promise.
struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(FNV_OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    /// Length prefix keeps `("ab", "c")` and `("a", "bc")` apart.
    fn write_field(&mut self, field: &str) {
        self.write(&(field.len() as u64).to_le_bytes());
        self.write(field.as_bytes());
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
