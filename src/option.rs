// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::value::{OptionType, Value};

/// String to show in usage if an option is required
const REQUIRED_STR: &str = " (required)";

/// Returns the command-line form of an option name: `-x` for single
/// character names, `--name` otherwise.
fn flag_form(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

/// Describes how a single handler parameter is bound to a command-line
/// option.
///
/// # Note
///
/// - All members are public for convenience; use the builder methods to
///   create a schema.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionSchema {
    /// Name used for the option on the command line (required).
    ///
    /// Single character names are specified as `-x`, longer names as
    /// `--name`.
    pub name: String,
    /// Type of value the option is bound to.
    pub option_type: OptionType,
    /// Value used if the option is not specified.
    pub default: Option<Value>,
    /// Alternative names for the option.
    pub aliases: Vec<String>,
    /// Description of the option.
    pub help: Option<String>,
    /// Set if the option must be specified.
    pub required: bool,
}

impl OptionSchema {
    /// Create a new option schema.
    pub fn new(name: &str, option_type: OptionType) -> Self {
        OptionSchema {
            name: name.into(),
            option_type,
            ..Default::default()
        }
    }

    /// Convenience constructor for a [OptionType::Text] option.
    pub fn text(name: &str) -> Self {
        OptionSchema::new(name, OptionType::Text)
    }

    /// Convenience constructor for a [OptionType::Number] option.
    pub fn number(name: &str) -> Self {
        OptionSchema::new(name, OptionType::Number)
    }

    /// Convenience constructor for a [OptionType::Flag] option.
    pub fn flag(name: &str) -> Self {
        OptionSchema::new(name, OptionType::Flag)
    }

    /// Specify the value to use when the option is not given.
    pub fn with_default<V: Into<Value>>(self, value: V) -> Self {
        OptionSchema {
            default: Some(value.into()),
            ..self
        }
    }

    /// Add an alternative name for the option.
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Specify the help text for the option.
    pub fn help(self, help: &str) -> Self {
        OptionSchema {
            help: Some(help.into()),
            ..self
        }
    }

    /// Specify that the option must be provided on the command-line.
    pub fn required(self) -> Self {
        OptionSchema {
            required: true,
            ..self
        }
    }
}

impl fmt::Display for OptionSchema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<String> = std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .map(|n| flag_form(n))
            .collect();

        let value = match self.option_type {
            OptionType::Text => " <string>",
            OptionType::Number => " <number>",
            OptionType::Flag => "",
        };

        let required = if self.required { REQUIRED_STR } else { "" };

        let help: String = match &self.help {
            Some(help) => format!(" # {}", help),
            _ => "".into(),
        };

        write!(f, "{}{}{}{}", names.join(", "), value, required, help)
    }
}

/// The stored record linking a handler parameter's position to its
/// declared type and option schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDescriptor {
    /// Index of the parameter in the handler's parameter list.
    pub position: usize,
    /// Type the resolved value must have.
    pub declared_type: OptionType,
    /// How the parameter is specified on the command line.
    pub option: OptionSchema,
}

impl ParameterDescriptor {
    /// Create a descriptor for the parameter at `position`.
    pub fn new(position: usize, option: OptionSchema) -> Self {
        ParameterDescriptor {
            position,
            declared_type: option.option_type,
            option,
        }
    }

    /// The canonical name used to look the option up after parsing.
    pub fn name(&self) -> &str {
        &self.option.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_schema() {
        let default_schema = OptionSchema::default();

        let expected_default = OptionSchema {
            name: "".into(),
            option_type: OptionType::Text,
            default: None,
            aliases: vec![],
            help: None,
            required: false,
        };

        assert_eq!(default_schema, expected_default);

        //--------------------

        let schema = OptionSchema::number("count");

        assert_eq!(schema.name, "count");
        assert_eq!(schema.option_type, OptionType::Number);
        assert_eq!(schema.default, None);

        //--------------------

        let schema = OptionSchema::text("out").with_default("a.out");
        assert_eq!(schema.default, Some(Value::Text("a.out".into())));

        //--------------------

        let schema = OptionSchema::flag("verbose").alias("v").alias("chatty");
        assert_eq!(schema.aliases, vec!["v".to_string(), "chatty".to_string()]);

        //--------------------

        let help = "some help text\nfoo bar\nthe end";
        let schema = OptionSchema::flag("d").help(help);
        assert_eq!(schema.help, Some(help.into()));

        //--------------------

        let schema = OptionSchema::text("r").required();
        assert_eq!(schema.required, true);
    }

    #[test]
    fn test_option_schema_display() {
        #[derive(Debug)]
        struct TestData {
            schema: OptionSchema,
            result: &'static str,
        }

        let tests = &[
            TestData {
                schema: OptionSchema::flag("d"),
                result: "-d",
            },
            TestData {
                schema: OptionSchema::flag("debug").alias("d"),
                result: "--debug, -d",
            },
            TestData {
                schema: OptionSchema::text("name"),
                result: "--name <string>",
            },
            TestData {
                schema: OptionSchema::number("n").required(),
                result: "-n <number> (required)",
            },
            TestData {
                schema: OptionSchema::number("jobs")
                    .alias("j")
                    .required()
                    .help("parallel jobs"),
                result: "--jobs, -j <number> (required) # parallel jobs",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.schema.to_string(), d.result, "{}", msg);
        }
    }

    #[test]
    fn test_parameter_descriptor() {
        let desc = ParameterDescriptor::new(3, OptionSchema::flag("force"));

        assert_eq!(desc.position, 3);
        assert_eq!(desc.declared_type, OptionType::Flag);
        assert_eq!(desc.name(), "force");
    }
}
