// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::{HashMap, HashSet};
use std::env;
use std::iter::Peekable;

use tracing::trace;

use crate::value::Value;

const OPT_PREFIX: char = '-';

/// Special argument that is silently consumed and used to denote the end of
/// all options; all arguments that follow are considered to be positional
/// arguments (even if they start with `-`!)
///
/// See: `getopt(3)`.
pub(crate) const END_OF_OPTIONS: &str = "--";
const LONG_OPT_PREFIX: &str = END_OF_OPTIONS;

/// Prefix used to negate a long option (`--no-color` sets `color` to
/// `false`).
const NEGATION_PREFIX: &str = "no-";

const TRUE_STR: &str = "true";
const FALSE_STR: &str = "false";

/// Get a list of all command-line arguments specified to the program with
/// the program name (the first argument) removed.
pub fn get_args() -> Vec<String> {
    env::args().skip(1).collect()
}

/// Describes how the parser should treat the option names it finds.
///
/// Options that are neither in `strings` nor in `booleans` are "numeric
/// or anything": values that look like numbers become [Value::Number],
/// everything else stays a [Value::Text].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParserConfig {
    /// Options whose values are always kept as strings.
    pub strings: HashSet<String>,
    /// Options that are boolean flags.
    pub booleans: HashSet<String>,
    /// Value for each option if it is not specified.
    pub defaults: HashMap<String, Value>,
    /// Alternative names for each option.
    pub aliases: HashMap<String, Vec<String>>,
    /// Stop parsing at the first positional argument; it and everything
    /// after it is returned as positional arguments.
    pub stop_early: bool,
}

impl ParserConfig {
    /// Create a new, empty parser configuration.
    pub fn new() -> Self {
        ParserConfig::default()
    }

    /// Treat the values of option `name` as strings.
    pub fn string(mut self, name: &str) -> Self {
        self.strings.insert(name.into());
        self
    }

    /// Treat option `name` as a boolean flag.
    pub fn boolean(mut self, name: &str) -> Self {
        self.booleans.insert(name.into());
        self
    }

    /// Specify the default value for option `name`.
    pub fn default_value<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Make `alias` an alternative name for option `name`.
    pub fn alias(mut self, name: &str, alias: &str) -> Self {
        self.aliases
            .entry(name.into())
            .or_insert_with(Vec::new)
            .push(alias.into());
        self
    }

    /// Specify whether to stop at the first positional argument.
    pub fn stop_early(self, stop_early: bool) -> Self {
        ParserConfig { stop_early, ..self }
    }
}

/// The result of a parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parsed {
    /// Value for each option name (and every alias of it).
    values: HashMap<String, Value>,
    /// Number of times each option was specified on the command-line.
    counts: HashMap<String, usize>,
    /// Non-option arguments, in order.
    positional: Vec<String>,
    /// Options found on the command-line that were not configured.
    unknown: Vec<String>,
}

impl Parsed {
    /// Returns the value for the option with the specified name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the number of times the option was specified on the
    /// command-line (defaults are not counted).
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Returns the positional (non-option) arguments.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Returns the names of the options that were specified but not
    /// configured, in the order they were found.
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }
}

/// Determine if the specified string looks like a number.
///
/// Accepts decimal integers and fractions with an optional sign and
/// exponent (`-1`, `+2.5`, `.5`, `3.`, `1e-3`) and hex integers (`0x1f`).
pub(crate) fn is_number(s: &str) -> bool {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let s = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);

    let (mantissa, exponent) = match s.find('e') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = match mantissa.find('.') {
        Some(pos) => (&mantissa[..pos], Some(&mantissa[pos + 1..])),
        None => (mantissa, None),
    };

    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

    let mantissa_ok = match frac_part {
        None => !int_part.is_empty() && all_digits(int_part),
        Some(frac) => {
            all_digits(int_part)
                && all_digits(frac)
                && (!int_part.is_empty() || !frac.is_empty())
        }
    };

    let exponent_ok = match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    };

    mantissa_ok && exponent_ok
}

/// Convert a string that [is_number()] accepts into a number.
fn to_number(s: &str) -> Option<f64> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return hex
            .chars()
            .map(|c| c.to_digit(16))
            .try_fold(0f64, |n, digit| digit.map(|d| n * 16.0 + f64::from(d)));
    }

    s.parse::<f64>().ok()
}

/// Determine if the argument looks like an option (and so cannot be used
/// as the value of the option before it).
fn looks_like_option(arg: &str) -> bool {
    let rest = match arg.strip_prefix(LONG_OPT_PREFIX) {
        Some(rest) => rest,
        None => match arg.strip_prefix(OPT_PREFIX) {
            Some(rest) => rest,
            None => return false,
        },
    };

    matches!(rest.chars().next(), Some(c) if c != OPT_PREFIX)
}

fn as_bool(arg: &str) -> Option<bool> {
    match arg {
        TRUE_STR => Some(true),
        FALSE_STR => Some(false),
        _ => None,
    }
}

/// Parse state built from a [ParserConfig].
struct Parser<'a> {
    config: &'a ParserConfig,
    /// Every alias group, keyed by each of its members: the value lists
    /// the _other_ names in the group.
    aliases: HashMap<String, Vec<String>>,
    strings: HashSet<String>,
    booleans: HashSet<String>,
    parsed: Parsed,
}

impl<'a> Parser<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        let mut aliases = HashMap::<String, Vec<String>>::new();

        for (name, names) in &config.aliases {
            aliases
                .entry(name.clone())
                .or_insert_with(Vec::new)
                .extend(names.iter().cloned());

            for alias in names {
                let others: Vec<String> = std::iter::once(name)
                    .chain(names.iter())
                    .filter(|n| *n != alias)
                    .cloned()
                    .collect();

                aliases
                    .entry(alias.clone())
                    .or_insert_with(Vec::new)
                    .extend(others);
            }
        }

        // An alias of a string (or boolean) option is a string (or
        // boolean) option too.
        let with_aliases = |names: &HashSet<String>| -> HashSet<String> {
            let mut set = names.clone();

            for name in names {
                if let Some(others) = aliases.get(name) {
                    set.extend(others.iter().cloned());
                }
            }

            set
        };

        let strings = with_aliases(&config.strings);
        let booleans = with_aliases(&config.booleans);

        Parser {
            config,
            aliases,
            strings,
            booleans,
            parsed: Parsed::default(),
        }
    }

    fn is_string(&self, key: &str) -> bool {
        self.strings.contains(key)
    }

    fn is_boolean(&self, key: &str) -> bool {
        self.booleans.contains(key)
    }

    fn is_known(&self, key: &str) -> bool {
        self.is_string(key)
            || self.is_boolean(key)
            || self.aliases.contains_key(key)
            || self.config.defaults.contains_key(key)
    }

    /// Store the value for the key and all its aliases.
    fn store(&mut self, key: &str, value: Value) {
        if let Some(others) = self.aliases.get(key) {
            for other in others {
                self.parsed.values.insert(other.clone(), value.clone());
            }
        }

        self.parsed.values.insert(key.into(), value);
    }

    /// Record an option found on the command-line.
    fn set(&mut self, key: &str, value: Value) {
        trace!(option = key, value = %value, "option");

        if !self.is_known(key) && !self.parsed.unknown.iter().any(|u| u == key) {
            self.parsed.unknown.push(key.into());
        }

        *self.parsed.counts.entry(key.into()).or_insert(0) += 1;

        if let Some(others) = self.aliases.get(key) {
            for other in others {
                *self.parsed.counts.entry(other.clone()).or_insert(0) += 1;
            }
        }

        self.store(key, value);
    }

    /// Record an option with a string value found on the command-line,
    /// converting it to a number where appropriate.
    fn set_str(&mut self, key: &str, value: &str) {
        let value = if !self.is_string(key) && is_number(value) {
            match to_number(value) {
                Some(n) => Value::Number(n),
                None => Value::Text(value.into()),
            }
        } else {
            Value::Text(value.into())
        };

        self.set(key, value);
    }

    /// Value for an option specified without a value.
    fn bare(&self, key: &str) -> Value {
        if self.is_string(key) {
            Value::Text("".into())
        } else {
            Value::Flag(true)
        }
    }

    /// Handle the final option in an argument (`--name` or the last
    /// letter of `-abc`) which may consume the next argument as its
    /// value.
    fn set_with_next<'s, I>(&mut self, key: &str, iter: &mut Peekable<I>)
    where
        I: Iterator<Item = &'s str>,
    {
        match iter.peek().copied() {
            Some(next) if !looks_like_option(next) && !self.is_boolean(key) => {
                self.set_str(key, next);
                iter.next();
            }
            Some(next) if as_bool(next).is_some() => {
                self.set(key, Value::Flag(next == TRUE_STR));
                iter.next();
            }
            _ => {
                let value = self.bare(key);
                self.set(key, value);
            }
        }
    }

    fn handle_long<'s, I>(&mut self, rest: &str, iter: &mut Peekable<I>)
    where
        I: Iterator<Item = &'s str>,
    {
        if let Some(pos) = rest.find('=') {
            let (key, value) = (&rest[..pos], &rest[pos + 1..]);

            if self.is_boolean(key) {
                self.set(key, Value::Flag(value != FALSE_STR));
            } else {
                self.set_str(key, value);
            }
        } else if let Some(key) = rest
            .strip_prefix(NEGATION_PREFIX)
            .filter(|k| !k.is_empty() && !self.is_known(rest))
        {
            self.set(key, Value::Flag(false));
        } else {
            self.set_with_next(rest, iter);
        }
    }

    fn handle_short<'s, I>(&mut self, rest: &str, iter: &mut Peekable<I>)
    where
        I: Iterator<Item = &'s str>,
    {
        let letters: Vec<char> = rest.chars().collect();

        // Note: safe since the caller checks 'rest' is not empty.
        let last = letters.len() - 1;

        for (j, letter) in letters.iter().enumerate().take(last) {
            let key = letter.to_string();
            let next: String = letters[j + 1..].iter().collect();

            if next == "-" {
                self.set_str(&key, &next);
                continue;
            }

            if letter.is_ascii_alphabetic() {
                if let Some(value) = next.strip_prefix('=') {
                    self.set_str(&key, value);
                    return;
                }

                if is_number(&next) {
                    self.set_str(&key, &next);
                    return;
                }
            }

            let following = letters[j + 1];

            if !(following.is_alphanumeric() || following == '_') {
                self.set_str(&key, &next);
                return;
            }

            let value = self.bare(&key);
            self.set(&key, value);
        }

        let key = letters[last].to_string();

        if key != "-" {
            self.set_with_next(&key, iter);
        }
    }

    fn run<'s, I>(mut self, cli_args: I) -> Parsed
    where
        I: Iterator<Item = &'s str>,
    {
        let config = self.config;

        // Booleans start out false unless they have a default.
        for name in config.booleans.iter() {
            let value = config
                .defaults
                .get(name)
                .cloned()
                .unwrap_or(Value::Flag(false));

            self.store(name, value);
        }

        let mut iter = cli_args.peekable();

        while let Some(cli_arg) = iter.next() {
            trace!(arg = cli_arg, "token");

            if cli_arg == END_OF_OPTIONS {
                self.parsed.positional.extend(iter.by_ref().map(String::from));
                break;
            }

            if let Some(rest) = cli_arg.strip_prefix(LONG_OPT_PREFIX) {
                self.handle_long(rest, &mut iter);
            } else if let Some(rest) = cli_arg
                .strip_prefix(OPT_PREFIX)
                .filter(|r| !r.is_empty() && !r.starts_with(OPT_PREFIX))
            {
                self.handle_short(rest, &mut iter);
            } else {
                // Positional (non-option) parameter
                self.parsed.positional.push(cli_arg.into());

                if config.stop_early {
                    self.parsed.positional.extend(iter.by_ref().map(String::from));
                    break;
                }
            }
        }

        let mut defaults: Vec<(&String, &Value)> = config.defaults.iter().collect();
        defaults.sort_by(|a, b| a.0.cmp(b.0));

        for (name, value) in defaults {
            if !self.parsed.values.contains_key(name) {
                self.store(name, value.clone());
            }
        }

        self.parsed
    }
}

/// Parse a set of command line arguments (without the program name).
///
/// # Notes
///
/// - Long options may be specified as `--name value` or `--name=value`,
///   and negated with `--no-name`.
/// - Short options may be bundled (`-abc`) and the last option in a bundle
///   may take a value (`-abc value`). Values may also be attached
///   (`-n5`, `-n=5`).
/// - Options that are not booleans consume the next argument as their value
///   unless it looks like an option. Booleans only consume a following
///   `true` or `false`.
/// - If an option is specified multiple times, the last value wins.
/// - The parse never fails: options that were not configured are recorded
///   (see [Parsed::unknown()]) and their values are typed on a best-effort
///   basis.
pub fn parse<S: AsRef<str>>(cli_args: &[S], config: &ParserConfig) -> Parsed {
    Parser::new(config).run(cli_args.iter().map(AsRef::as_ref))
}
