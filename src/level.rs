//! Severity levels understood by loggers and handlers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a log record, ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HumioLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
}

/// Raised when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0:?}")]
pub struct LevelParseError(pub String);

impl HumioLevel {
    /// Lowercase name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for HumioLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HumioLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(LevelParseError(s.to_owned())),
        }
    }
}

impl From<HumioLevel> for u8 {
    fn from(level: HumioLevel) -> Self {
        level as u8
    }
}

impl From<u8> for HumioLevel {
    /// Values above the highest discriminant saturate to `Critical`.
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            _ => Self::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("info", HumioLevel::Info)]
    #[case("INFO", HumioLevel::Info)]
    #[case(" warn ", HumioLevel::Warn)]
    #[case("warning", HumioLevel::Warn)]
    #[case("Critical", HumioLevel::Critical)]
    fn parses_known_names(#[case] input: &str, #[case] expected: HumioLevel) {
        assert_eq!(input.parse::<HumioLevel>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "verbose".parse::<HumioLevel>().expect_err("should reject");
        assert_eq!(err, LevelParseError("verbose".into()));
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(HumioLevel::Trace < HumioLevel::Debug);
        assert!(HumioLevel::Info < HumioLevel::Warn);
        assert!(HumioLevel::Error < HumioLevel::Critical);
    }

    #[test]
    fn u8_conversion_round_trips() {
        for level in [
            HumioLevel::Trace,
            HumioLevel::Debug,
            HumioLevel::Info,
            HumioLevel::Warn,
            HumioLevel::Error,
            HumioLevel::Critical,
        ] {
            assert_eq!(HumioLevel::from(u8::from(level)), level);
        }
    }
}
