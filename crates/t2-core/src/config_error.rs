use std::fmt;

/// Errors raised when a modulator configuration names a combination for
/// which no coding parameters are defined. These are rejected at
/// construction time rather than silently substituted.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigErr {
    /// The (frame size, code rate) pair has no parameter table.
    UnsupportedRate { framesize: &'static str, rate: &'static str },
    /// The (frame size, constellation) pair has no interleaver tables.
    UnsupportedInterleave { framesize: &'static str, constellation: &'static str },
    /// A scalar field is outside its signalled range.
    InvalidValue { field: &'static str, value: u64, max: u64 },
    /// The configuration file could not be read or parsed.
    FileErr { reason: String },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::UnsupportedRate { framesize, rate } => {
                write!(f, "no coding parameters for {} frames at rate {}", framesize, rate)
            }
            ConfigErr::UnsupportedInterleave { framesize, constellation } => {
                write!(
                    f,
                    "no interleaver tables for {} frames with {} cells",
                    framesize, constellation
                )
            }
            ConfigErr::InvalidValue { field, value, max } => {
                write!(f, "field {} value {} out of range (maximum {})", field, value, max)
            }
            ConfigErr::FileErr { reason } => {
                write!(f, "config file error: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigErr {}
