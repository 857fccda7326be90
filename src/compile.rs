// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::option::ParameterDescriptor;
use crate::parser::ParserConfig;
use crate::value::{OptionType, Value};

/// Build the parser configuration for a handler's parameters.
///
/// Text options without a default are given an empty string default and
/// number options are given a zero default. This is written back to the
/// descriptors so later steps see the filled in value. Flags default to
/// `false` in the parser.
///
/// If two descriptors use the same option name, the last one's default
/// wins.
pub fn compile(descriptors: &mut [ParameterDescriptor]) -> ParserConfig {
    let mut config = ParserConfig::new();

    for desc in descriptors.iter_mut() {
        let name = desc.option.name.clone();

        let unset = desc
            .option
            .default
            .as_ref()
            .map_or(true, Value::is_falsy);

        match desc.declared_type {
            OptionType::Text => {
                config.strings.insert(name.clone());

                if unset {
                    desc.option.default = Some(Value::Text("".into()));
                }
            }
            OptionType::Flag => {
                config.booleans.insert(name.clone());
            }
            OptionType::Number => {
                if unset {
                    desc.option.default = Some(Value::Number(0.0));
                }
            }
        }

        match &desc.option.default {
            Some(default) => {
                config.defaults.insert(name.clone(), default.clone());
            }
            None => {
                config.defaults.remove(&name);
            }
        }

        if !desc.option.aliases.is_empty() {
            config
                .aliases
                .entry(name)
                .or_insert_with(Vec::new)
                .extend(desc.option.aliases.iter().cloned());
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::option::OptionSchema;

    fn descriptors(schemas: Vec<OptionSchema>) -> Vec<ParameterDescriptor> {
        schemas
            .into_iter()
            .enumerate()
            .map(|(i, s)| ParameterDescriptor::new(i, s))
            .collect()
    }

    #[test]
    fn test_compile_empty() {
        let config = compile(&mut []);

        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_compile() {
        let mut list = descriptors(vec![
            OptionSchema::text("name"),
            OptionSchema::text("out").with_default("a.out"),
            OptionSchema::number("count"),
            OptionSchema::number("jobs").with_default(4),
            OptionSchema::flag("verbose").alias("v"),
            OptionSchema::flag("color").with_default(true),
        ]);

        let config = compile(&mut list);

        let expected = ParserConfig::new()
            .string("name")
            .string("out")
            .boolean("verbose")
            .boolean("color")
            .default_value("name", "")
            .default_value("out", "a.out")
            .default_value("count", 0)
            .default_value("jobs", 4)
            .default_value("color", true)
            .alias("verbose", "v");

        assert_eq!(config, expected);

        // Defaults are written back to the descriptors.
        assert_eq!(list[0].option.default, Some(Value::from("")));
        assert_eq!(list[1].option.default, Some(Value::from("a.out")));
        assert_eq!(list[2].option.default, Some(Value::from(0)));
        assert_eq!(list[3].option.default, Some(Value::from(4)));
        assert_eq!(list[4].option.default, None);
        assert_eq!(list[5].option.default, Some(Value::from(true)));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let mut list = descriptors(vec![
            OptionSchema::text("name"),
            OptionSchema::number("count"),
            OptionSchema::flag("verbose"),
        ]);

        let first = compile(&mut list);
        let filled = list.clone();
        let second = compile(&mut list);

        assert_eq!(first, second);
        assert_eq!(list, filled);
    }

    #[test]
    fn test_compile_duplicate_names() {
        let mut list = descriptors(vec![
            OptionSchema::number("n").with_default(1),
            OptionSchema::number("n").with_default(2),
        ]);

        let config = compile(&mut list);

        assert_eq!(config.defaults.get("n"), Some(&Value::from(2)));
    }
}
