// ── Course identity ──
//
// Every course carries the backend's integer primary key. Identity
// comparisons across the learning path and the catalog go through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Canonical identifier for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Stable 0-9 bucket used to pick a card accent colour.
    pub const fn bg_key(self) -> u8 {
        // `% 10` always fits in a u8.
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let key = (self.0 % 10) as u8;
        key
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for CourseId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn course_id_display_and_parse() {
        let id: CourseId = " 42 ".parse().unwrap();
        assert_eq!(id, CourseId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn course_id_rejects_garbage() {
        assert!("forty-two".parse::<CourseId>().is_err());
    }

    #[test]
    fn bg_key_is_last_digit() {
        assert_eq!(CourseId::new(7).bg_key(), 7);
        assert_eq!(CourseId::new(1234).bg_key(), 4);
        assert_eq!(CourseId::new(u64::MAX).bg_key(), 5);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&CourseId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
