//! Exit codes for the collector CLI.
//!
//! Distinct codes let scripts tell a partially failed batch apart from a
//! configuration or input problem.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every record processed
    Success = 0,
    /// Some records could not be read, parsed or written
    RecordFailures = 1,
    /// Configuration error (invalid config file, missing records directory)
    ConfigError = 2,
    /// I/O error (file read/write failure)
    IoError = 4,
    /// Parse error (invalid GraphQL syntax in a resolve input)
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::RecordFailures => write!(f, "record failures"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::RecordFailures.code(), 1);
        assert_eq!(ExitCode::ConfigError.code(), 2);
        assert_eq!(ExitCode::IoError.code(), 4);
        assert_eq!(ExitCode::ParseError.code(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::ConfigError.to_string(), "configuration error");
    }
}
