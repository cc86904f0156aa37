use crate::error::TimeParseError;
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const FORMAT: &str = "%H:%M";

/// Wall-clock time of day in `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let trimmed = input.trim();
        // chrono accepts single-digit hours; the contract does not.
        if trimmed.len() != 5 {
            return Err(TimeParseError(input.to_string()));
        }
        NaiveTime::parse_from_str(trimmed, FORMAT)
            .map(Self)
            .map_err(|_| TimeParseError(input.to_string()))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn is_before(&self, other: &TimeOfDay) -> bool {
        self < other
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// `true` when both parse and `start` is strictly earlier than `end`.
pub fn is_ordered_range(start: &str, end: &str) -> bool {
    match (TimeOfDay::parse(start), TimeOfDay::parse(end)) {
        (Ok(start), Ok(end)) => start.is_before(&end),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hh_mm() {
        let t = TimeOfDay::parse("06:30").expect("valid");
        assert_eq!(t.to_string(), "06:30");
        assert!(TimeOfDay::parse("6:30").is_err());
        assert!(TimeOfDay::parse("24:00").is_err());
    }

    #[test]
    fn ordering_is_strict() {
        assert!(is_ordered_range("06:00", "23:00"));
        assert!(!is_ordered_range("12:00", "12:00"));
        assert!(!is_ordered_range("18:00", "12:00"));
        assert!(!is_ordered_range("", "12:00"));
    }

    #[test]
    fn serde_uses_string_form() {
        let t = TimeOfDay::from_hm(22, 0).expect("valid");
        let json = serde_json::to_string(&t).expect("serialize");
        assert_eq!(json, "\"22:00\"");
        let back: TimeOfDay = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, t);
    }
}
