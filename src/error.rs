// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

use crate::value::OptionType;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Incorrect API usage errors (programmer error)
    //------------------------------
    /// A command was built without a handler to call.
    #[error("no handler specified")]
    NoHandler,

    /// An option was registered with an empty name.
    #[error("missing option name")]
    MissingOptName,

    /// An option was registered with a default value of the wrong type.
    #[error("option '{name}' has a default that is not of type '{expected}'")]
    InvalidDefault {
        /// Name of the option.
        name: String,
        /// Type declared for the option.
        expected: OptionType,
    },

    /// An option was registered for a parameter position beyond
    /// [MAX_POSITION](crate::MAX_POSITION).
    #[error("option '{name}' has invalid parameter position {position}")]
    InvalidPosition {
        /// Name of the option.
        name: String,
        /// Position the option was registered for.
        position: usize,
    },

    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// The value resolved for a parameter does not match its declared type.
    #[error("parameter {position} (type '{expected}') is not a {}", .expected.describe())]
    TypeMismatch {
        /// Position of the parameter in the handler's parameter list.
        position: usize,
        /// Type declared for the parameter.
        expected: OptionType,
    },

    /// An option that must be specified was not specified.
    #[error("missing required option '{name}'")]
    MissingReqOpt {
        /// Name of the option.
        name: String,
    },

    /// User specified an unknown option
    /// (only reported if `Settings::deny_unknown_options` is set).
    #[error("unknown option '{name}'")]
    UnknownOpt {
        /// Name of the option as found on the command line.
        name: String,
    },

    /// A handler asked for an option value that was not bound, or that
    /// has a different type.
    #[error("no {expected} value bound for option '{name}'")]
    NotBound {
        /// Name of the option.
        name: String,
        /// Type asked for.
        expected: OptionType,
    },

    //------------------------------
    // Other errors
    //------------------------------
    /// Failed to write the help output.
    #[error("failed to write help: {0}")]
    Io(String),

    /// Error returned by a handler.
    #[error("handler error: {0:?}")]
    HandlerError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        #[derive(Debug)]
        struct TestData {
            error: Error,
            result: &'static str,
        }

        let tests = &[
            TestData {
                error: Error::NoHandler,
                result: "no handler specified",
            },
            TestData {
                error: Error::TypeMismatch {
                    position: 2,
                    expected: OptionType::Number,
                },
                result: "parameter 2 (type 'Number') is not a number",
            },
            TestData {
                error: Error::TypeMismatch {
                    position: 0,
                    expected: OptionType::Text,
                },
                result: "parameter 0 (type 'String') is not a string",
            },
            TestData {
                error: Error::InvalidDefault {
                    name: "count".into(),
                    expected: OptionType::Flag,
                },
                result: "option 'count' has a default that is not of type 'Boolean'",
            },
            TestData {
                error: Error::InvalidPosition {
                    name: "d".into(),
                    position: 300,
                },
                result: "option 'd' has invalid parameter position 300",
            },
            TestData {
                error: Error::NotBound {
                    name: "jobs".into(),
                    expected: OptionType::Number,
                },
                result: "no Number value bound for option 'jobs'",
            },
            TestData {
                error: Error::MissingReqOpt {
                    name: "out".into(),
                },
                result: "missing required option 'out'",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.error.to_string(), d.result, "{}", msg);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::from(io_err);

        assert_eq!(err, Error::Io("disk full".into()));
    }
}
