use crate::ConfigError;
use std::{fmt, str::FromStr};

/// Severity of a log record, and the level a logger or writer is configured with.
///
/// The six concrete severities are ordered from most severe (`Critical`) to least
/// severe (`Trace`); their numeric value grows as the severity decreases.
/// `Unspecified` is not a severity: on a logger it means "inherit from the parent",
/// on a writer it means "accept everything".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Level {
    /// No explicit level.
    #[default]
    Unspecified = 0,
    /// The program cannot continue.
    Critical = 1,
    /// Something failed.
    Error = 2,
    /// Something unexpected happened, but the program continues.
    Warning = 3,
    /// Normal operational messages.
    Info = 4,
    /// Information useful for debugging.
    Debug = 5,
    /// Very detailed tracing output.
    Trace = 6,
}

impl Level {
    /// All concrete levels, from most to least severe.
    pub const CONCRETE: [Level; 6] = [
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Inverse of `level as u8`; unknown values become `Unspecified`.
    #[must_use]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Level::Critical,
            2 => Level::Error,
            3 => Level::Warning,
            4 => Level::Info,
            5 => Level::Debug,
            6 => Level::Trace,
            _ => Level::Unspecified,
        }
    }

    /// Returns `false` only for `Unspecified`.
    #[must_use]
    pub fn is_concrete(self) -> bool {
        self != Level::Unspecified
    }

    /// Returns whether a record with this level passes the given floor.
    ///
    /// An `Unspecified` floor admits everything; otherwise the record must be
    /// at least as severe as the floor. An `Unspecified` record only passes an
    /// `Unspecified` floor.
    #[must_use]
    pub fn is_enabled(self, floor: Level) -> bool {
        match (floor, self) {
            (Level::Unspecified, _) => true,
            (_, Level::Unspecified) => false,
            (floor, level) => (level as u8) <= (floor as u8),
        }
    }

    /// Returns the less severe of two floors, i.e. the one that admits more records.
    ///
    /// `Unspecified` admits everything and therefore always wins.
    #[must_use]
    pub fn least_severe(self, other: Level) -> Level {
        if self == Level::Unspecified || other == Level::Unspecified {
            Level::Unspecified
        } else if (self as u8) >= (other as u8) {
            self
        } else {
            other
        }
    }

    /// Upper-case long name, e.g. `WARNING`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Unspecified => "UNSPECIFIED",
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    /// Four-character code, for compact log lines.
    #[must_use]
    pub fn short(self) -> &'static str {
        match self {
            Level::Unspecified => "UNSP",
            Level::Critical => "CRIT",
            Level::Error => "ERRR",
            Level::Warning => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBG",
            Level::Trace => "TRCE",
        }
    }

    /// The closest `log::LevelFilter`; `Unspecified` maps to `Trace`.
    #[must_use]
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Critical | Level::Error => log::LevelFilter::Error,
            Level::Warning => log::LevelFilter::Warn,
            Level::Info => log::LevelFilter::Info,
            Level::Debug => log::LevelFilter::Debug,
            Level::Trace | Level::Unspecified => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNSPECIFIED" => Ok(Level::Unspecified),
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            _ => Err(ConfigError::UnknownLevel(s.trim().to_string())),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Critical | Level::Error => log::Level::Error,
            Level::Warning => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
            Level::Trace | Level::Unspecified => log::Level::Trace,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Level;

    #[test]
    fn severity_order() {
        assert!(Level::Critical.is_enabled(Level::Warning));
        assert!(Level::Warning.is_enabled(Level::Warning));
        assert!(!Level::Info.is_enabled(Level::Warning));
        assert!(Level::Trace.is_enabled(Level::Unspecified));
        assert!(!Level::Unspecified.is_enabled(Level::Trace));
        assert!(Level::Unspecified.is_enabled(Level::Unspecified));
    }

    #[test]
    fn least_severe_floor() {
        assert_eq!(Level::Warning.least_severe(Level::Info), Level::Info);
        assert_eq!(Level::Debug.least_severe(Level::Error), Level::Debug);
        assert_eq!(
            Level::Critical.least_severe(Level::Unspecified),
            Level::Unspecified
        );
    }

    #[test]
    fn parse_levels() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" Warning ".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("CRITICAL".parse::<Level>().unwrap(), Level::Critical);
        assert_eq!("unspecified".parse::<Level>().unwrap(), Level::Unspecified);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn numeric_roundtrip() {
        for level in Level::CONCRETE {
            assert_eq!(Level::from_u8(level as u8), level);
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
        assert_eq!(Level::from_u8(42), Level::Unspecified);
    }

    #[test]
    fn log_crate_mapping() {
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(log::Level::from(Level::Critical), log::Level::Error);
        assert_eq!(Level::Info.to_level_filter(), log::LevelFilter::Info);
    }
}
