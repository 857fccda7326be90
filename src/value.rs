// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

/// The kinds of value an option can be bound to.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Clone, Copy)]
pub enum OptionType {
    /// Option takes a string value.
    Text,
    /// Option takes a numeric value.
    Number,
    /// Option is a boolean flag (needs no value).
    Flag,
}

impl Default for OptionType {
    fn default() -> Self {
        OptionType::Text
    }
}

impl OptionType {
    /// Lower-case description of the runtime category of values of this
    /// type ("string", "number" or "boolean").
    pub fn describe(&self) -> &'static str {
        match self {
            OptionType::Text => "string",
            OptionType::Number => "number",
            OptionType::Flag => "boolean",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OptionType::Text => "String",
            OptionType::Number => "Number",
            OptionType::Flag => "Boolean",
        };

        write!(f, "{}", name)
    }
}

/// A value resolved from the command line (or a default).
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    /// A string value.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Flag(bool),
}

impl Value {
    /// Returns the runtime category of the value.
    pub fn option_type(&self) -> OptionType {
        match self {
            Value::Text(_) => OptionType::Text,
            Value::Number(_) => OptionType::Number,
            Value::Flag(_) => OptionType::Flag,
        }
    }

    /// Returns the string if this is a [Value::Text].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a [Value::Number].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [Value::Flag].
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Values that count as "not set" when deciding whether to fill in an
    /// implicit default: the empty string, zero and `false`.
    pub(crate) fn is_falsy(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Number(n) => *n == 0.0 || n.is_nan(),
            Value::Flag(b) => !*b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::default(), OptionType::Text);

        assert_eq!(OptionType::Text.to_string(), "String");
        assert_eq!(OptionType::Number.to_string(), "Number");
        assert_eq!(OptionType::Flag.to_string(), "Boolean");

        assert_eq!(OptionType::Text.describe(), "string");
        assert_eq!(OptionType::Number.describe(), "number");
        assert_eq!(OptionType::Flag.describe(), "boolean");
    }

    #[test]
    fn test_value() {
        #[derive(Debug)]
        struct TestData {
            value: Value,
            option_type: OptionType,
            display: &'static str,
            falsy: bool,
        }

        let tests = &[
            TestData {
                value: Value::from("foo"),
                option_type: OptionType::Text,
                display: "foo",
                falsy: false,
            },
            TestData {
                value: Value::from(""),
                option_type: OptionType::Text,
                display: "",
                falsy: true,
            },
            TestData {
                value: Value::from(3),
                option_type: OptionType::Number,
                display: "3",
                falsy: false,
            },
            TestData {
                value: Value::from(-1.5),
                option_type: OptionType::Number,
                display: "-1.5",
                falsy: false,
            },
            TestData {
                value: Value::from(0.0),
                option_type: OptionType::Number,
                display: "0",
                falsy: true,
            },
            TestData {
                value: Value::from(true),
                option_type: OptionType::Flag,
                display: "true",
                falsy: false,
            },
            TestData {
                value: Value::from(false),
                option_type: OptionType::Flag,
                display: "false",
                falsy: true,
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.value.option_type(), d.option_type, "{}", msg);
            assert_eq!(d.value.to_string(), d.display, "{}", msg);
            assert_eq!(d.value.is_falsy(), d.falsy, "{}", msg);
        }
    }

    #[test]
    fn test_value_accessors() {
        let text = Value::from("hello");
        assert_eq!(text.as_str(), Some("hello"));
        assert_eq!(text.as_number(), None);
        assert_eq!(text.as_flag(), None);

        let number = Value::from(42);
        assert_eq!(number.as_str(), None);
        assert_eq!(number.as_number(), Some(42.0));

        let flag = Value::from(true);
        assert_eq!(flag.as_flag(), Some(true));
        assert_eq!(flag.as_number(), None);
    }
}
