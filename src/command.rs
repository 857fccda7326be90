// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::compile::compile;
use crate::error::{Error, Result};
use crate::option::ParameterDescriptor;
use crate::parser::{get_args, parse, Parsed};
use crate::registry::{HandlerKey, Registry};
use crate::value::{OptionType, Value};

const HELP_OPTIONS: &[&str] = &["h", "help"];

const USAGE_PREFIX_SPACES: &str = "    ";

/// Settings used to control the binders behaviour.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialOrd, Default, PartialEq)]
pub struct Settings {
    /// Stop parsing options at the first positional argument.
    stop_early: bool,

    /// If set, an option that is not registered for the handler is an
    /// error; by default unknown options are ignored.
    deny_unknown_options: bool,

    /// If set, show the help statement (and do not call the handler) when
    /// `-h` or `--help` is specified.
    auto_help: bool,
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Specify that option parsing should stop at the first positional
    /// argument: it, and all arguments after it, are left unparsed (see
    /// [Bindings::rest()]).
    pub fn stop_early(self) -> Self {
        Settings {
            stop_early: true,
            ..self
        }
    }

    /// Specify that unknown options should generate an error
    /// (by default, they are silently ignored).
    pub fn deny_unknown_options(self) -> Self {
        Settings {
            deny_unknown_options: true,
            ..self
        }
    }

    /// Specify that `-h` and `--help` should display a help statement
    /// generated from the registered options rather than call the handler.
    ///
    /// # Note
    ///
    /// Don't enable this if the handler registers an option called `h`
    /// or `help`.
    pub fn auto_help(self) -> Self {
        Settings {
            auto_help: true,
            ..self
        }
    }
}

/// Handler-level configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandSchema {
    argv: Option<Vec<String>>,
    name: String,
    version: String,
    summary: String,
    help: String,
    notes: String,
    settings: Settings,
}

impl CommandSchema {
    /// Create a new command schema.
    pub fn new() -> Self {
        CommandSchema::default()
    }

    /// Specify the arguments to parse (without the program name).
    ///
    /// If not specified, the arguments the program was run with are used
    /// (these are read each time the handler is invoked).
    pub fn argv<S: AsRef<str>>(self, argv: &[S]) -> Self {
        CommandSchema {
            argv: Some(argv.iter().map(|a| a.as_ref().to_string()).collect()),
            ..self
        }
    }

    /// Specify the name of the program.
    pub fn name(self, name: &str) -> Self {
        CommandSchema {
            name: name.into(),
            ..self
        }
    }

    /// Specify the version of the program.
    pub fn version(self, version: &str) -> Self {
        CommandSchema {
            version: version.into(),
            ..self
        }
    }

    /// Specify brief explanatory text for the program.
    pub fn summary(self, summary: &str) -> Self {
        CommandSchema {
            summary: summary.into(),
            ..self
        }
    }

    /// Specify extended usage information for the program.
    pub fn help(self, help: &str) -> Self {
        CommandSchema {
            help: help.into(),
            ..self
        }
    }

    /// Specify notes for the program.
    pub fn notes(self, notes: &str) -> Self {
        CommandSchema {
            notes: notes.into(),
            ..self
        }
    }

    /// Specify any settings for the program.
    pub fn settings(self, settings: Settings) -> Self {
        CommandSchema { settings, ..self }
    }
}

/// The values passed to a handler.
///
/// Holds the arguments the handler was invoked with, with the value of
/// each registered option stored at its parameter position. Option values
/// can also be looked up by option name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    args: Vec<Option<Value>>,
    named: HashMap<String, Value>,
    rest: Vec<String>,
}

impl Bindings {
    /// Create bindings from the arguments a handler was invoked with.
    pub fn new(args: Vec<Value>) -> Self {
        Bindings {
            args: args.into_iter().map(Some).collect(),
            ..Default::default()
        }
    }

    /// Returns the number of parameter positions.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Determine if there are no parameter positions.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Returns the value at the specified parameter position.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.args.get(position).and_then(Option::as_ref)
    }

    /// Returns all parameter positions. Positions that were neither passed
    /// in the call nor bound to an option are `None`.
    pub fn args(&self) -> &[Option<Value>] {
        &self.args
    }

    /// Consume the bindings, returning all parameter positions.
    pub fn into_args(self) -> Vec<Option<Value>> {
        self.args
    }

    /// Returns the value bound for the option with the specified name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Returns the string bound for the option with the specified name.
    pub fn text(&self, name: &str) -> Result<&str> {
        self.value(name)
            .and_then(Value::as_str)
            .ok_or_else(|| not_bound(name, OptionType::Text))
    }

    /// Returns the number bound for the option with the specified name.
    pub fn number(&self, name: &str) -> Result<f64> {
        self.value(name)
            .and_then(Value::as_number)
            .ok_or_else(|| not_bound(name, OptionType::Number))
    }

    /// Returns the boolean bound for the option with the specified name.
    pub fn flag(&self, name: &str) -> Result<bool> {
        self.value(name)
            .and_then(Value::as_flag)
            .ok_or_else(|| not_bound(name, OptionType::Flag))
    }

    /// Returns the arguments that were not options or option values.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// Store the value at the specified position, adding empty positions
    /// as required.
    fn bind(&mut self, desc: &ParameterDescriptor, value: Value) {
        if desc.position >= self.args.len() {
            self.args.resize(desc.position + 1, None);
        }

        self.args[desc.position] = Some(value.clone());
        self.named.insert(desc.name().into(), value);
    }
}

fn not_bound(name: &str, expected: OptionType) -> Error {
    Error::NotBound {
        name: name.into(),
        expected,
    }
}

/// Trait that a handler must implement.
pub trait Handler {
    /// Function called with the bound values each time the command is
    /// invoked.
    ///
    /// # Return value
    ///
    /// - If the handler logic succeeds, return `Ok(())`.
    /// - If the handler needs to fail, it should return one of the [Error]
    ///   values. If the main errors are not appropriate, make the handler
    ///   return [Error::HandlerError].
    fn handle(&mut self, args: Bindings) -> Result<()>;
}

impl<'a> fmt::Debug for dyn Handler + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handler: {:p}", self as *const Self as *const ())
    }
}

/// Trait for types that can be built from the values bound for a handler.
///
/// This allows a handler to accept a single options `struct` rather than
/// looking values up itself.
pub trait FromBindings: Sized {
    /// Build the value.
    fn from_bindings(args: &Bindings) -> Result<Self>;
}

impl FromBindings for Bindings {
    fn from_bindings(args: &Bindings) -> Result<Self> {
        Ok(args.clone())
    }
}

/// Handler that calls a closure.
struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: FnMut(Bindings) -> Result<()>,
{
    fn handle(&mut self, args: Bindings) -> Result<()> {
        (self.0)(args)
    }
}

/// Handler that builds a value of type `T` and passes it to a closure.
struct TypedHandler<T, F> {
    func: F,
    _marker: PhantomData<fn(T)>,
}

impl<T, F> Handler for TypedHandler<T, F>
where
    T: FromBindings,
    F: FnMut(T) -> Result<()>,
{
    fn handle(&mut self, args: Bindings) -> Result<()> {
        let value = T::from_bindings(&args)?;

        (self.func)(value)
    }
}

/// Used to create a [Command].
#[derive(Debug)]
pub struct CommandBuilder<'a> {
    registry: Registry,
    key: HandlerKey,
    schema: CommandSchema,
    handler: Option<Box<dyn Handler + 'a>>,
}

impl<'a> CommandBuilder<'a> {
    /// Specify the command schema.
    pub fn schema(self, schema: CommandSchema) -> Self {
        CommandBuilder { schema, ..self }
    }

    /// Specify the handler, which must implement the [Handler] trait.
    ///
    /// # Note
    ///
    /// If the handler needs to modify its own state when called,
    /// implement the trait for a mutable reference to it.
    pub fn handler<H: Handler + 'a>(self, handler: H) -> Self {
        CommandBuilder {
            handler: Some(Box::new(handler)),
            ..self
        }
    }

    /// Specify a closure as the handler.
    pub fn handler_fn<F>(self, func: F) -> Self
    where
        F: FnMut(Bindings) -> Result<()> + 'a,
    {
        self.handler(FnHandler(func))
    }

    /// Specify a closure that accepts an options value built using
    /// [FromBindings] as the handler.
    pub fn typed<T, F>(self, func: F) -> Self
    where
        T: FromBindings + 'a,
        F: FnMut(T) -> Result<()> + 'a,
    {
        self.handler(TypedHandler {
            func,
            _marker: PhantomData,
        })
    }

    /// Create the command.
    ///
    /// # Errors
    ///
    /// - [Error::NoHandler] if no handler was specified.
    pub fn build(self) -> Result<Command<'a>> {
        let handler = self.handler.ok_or(Error::NoHandler)?;

        Ok(Command {
            registry: self.registry,
            key: self.key,
            schema: self.schema,
            handler,
        })
    }
}

/// A handler bound to the options registered for it.
#[derive(Debug)]
pub struct Command<'a> {
    registry: Registry,
    key: HandlerKey,
    schema: CommandSchema,
    handler: Box<dyn Handler + 'a>,
}

impl<'a> Command<'a> {
    /// Start building a command for the handler identified by `key`, whose
    /// options are registered in `registry`.
    pub fn builder(registry: &Registry, key: HandlerKey) -> CommandBuilder<'a> {
        CommandBuilder {
            registry: registry.clone(),
            key,
            schema: CommandSchema::default(),
            handler: None,
        }
    }

    /// Returns the key of the handler.
    pub fn key(&self) -> &HandlerKey {
        &self.key
    }

    /// Returns the command schema.
    pub fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    /// The arguments to parse: the ones in the schema, or the arguments
    /// the program was run with.
    fn argv(&self) -> Vec<String> {
        match &self.schema.argv {
            Some(argv) => argv.clone(),
            None => get_args(),
        }
    }

    /// Parse the command line and bind the option values into `args`.
    ///
    /// This does everything [Command::invoke()] does, apart from calling
    /// the handler.
    pub fn bind(&self, args: Vec<Value>) -> Result<Bindings> {
        let parsed = self.parse_argv(&self.argv());

        self.bind_parsed(args, &parsed)
    }

    /// Compile the parser configuration for the handler (filling in the
    /// implicit defaults) and parse `argv` with it.
    fn parse_argv(&self, argv: &[String]) -> Parsed {
        let config = self
            .registry
            .with_descriptors_mut(&self.key, |list| compile(list))
            .stop_early(self.schema.settings.stop_early);

        debug!(handler = %self.key, argv = ?argv, "parsing arguments");

        parse(argv, &config)
    }

    fn bind_parsed(&self, args: Vec<Value>, parsed: &Parsed) -> Result<Bindings> {
        let descriptors = self.registry.descriptors(&self.key);

        debug!(
            handler = %self.key,
            parameters = descriptors.len(),
            "binding options"
        );

        if self.schema.settings.deny_unknown_options {
            if let Some(name) = parsed.unknown().first() {
                return Err(Error::UnknownOpt { name: name.clone() });
            }
        }

        let mut bindings = Bindings::new(args);

        for desc in descriptors.iter() {
            if desc.option.required && parsed.count(desc.name()) == 0 {
                return Err(Error::MissingReqOpt {
                    name: desc.name().into(),
                });
            }

            let value = match parsed.get(desc.name()) {
                Some(value) if value.option_type() == desc.declared_type => value.clone(),
                _ => {
                    return Err(Error::TypeMismatch {
                        position: desc.position,
                        expected: desc.declared_type,
                    })
                }
            };

            trace!(
                position = desc.position,
                option = desc.name(),
                value = %value,
                "bound parameter"
            );

            bindings.bind(desc, value);
        }

        bindings.rest = parsed.positional().to_vec();

        Ok(bindings)
    }

    /// Invoke the handler: parse the command line, bind the option values
    /// into `args` and call the handler with the result.
    ///
    /// # Notes
    ///
    /// - If any option fails to bind, the handler is not called.
    /// - `args` is passed through unchanged if no options are registered.
    pub fn invoke(&mut self, args: Vec<Value>) -> Result<()> {
        let parsed = self.parse_argv(&self.argv());

        if self.schema.settings.auto_help && wants_help(&parsed) {
            return self.generate_help(&mut std::io::stdout());
        }

        let bindings = self.bind_parsed(args, &parsed)?;

        self.handler.handle(bindings)
    }

    /// Invoke the handler with no arguments of its own.
    pub fn run(&mut self) -> Result<()> {
        self.invoke(Vec::new())
    }

    /// Generate a help/usage statement from the registered options.
    pub fn generate_help<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut lines = Vec::<String>::new();

        let name = if self.schema.name.is_empty() {
            self.key.handler()
        } else {
            self.schema.name.as_str()
        };

        let line = format!("NAME:\n{}{}\n", USAGE_PREFIX_SPACES, name);
        lines.push(line);

        if !self.schema.version.is_empty() {
            let line = format!("VERSION:\n{}{}\n", USAGE_PREFIX_SPACES, self.schema.version);
            lines.push(line);
        }

        if !self.schema.summary.is_empty() {
            let line = format!(
                "SUMMARY:\n{}{}\n",
                USAGE_PREFIX_SPACES,
                self.schema.summary.trim()
            );
            lines.push(line);
        }

        lines.push("USAGE:".into());

        let line = format!("{}{} [FLAGS] [OPTIONS]\n", USAGE_PREFIX_SPACES, name);
        lines.push(line);

        //------------------------------------------------------------

        let mut descriptors = self.registry.descriptors(&self.key);
        descriptors.sort_by(|a, b| a.name().cmp(b.name()));

        let (flags, options): (Vec<_>, Vec<_>) = descriptors
            .iter()
            .partition(|d| d.declared_type == OptionType::Flag);

        lines.push("FLAGS:".into());

        for desc in flags {
            let line = format!("{}{}", USAGE_PREFIX_SPACES, desc.option);
            lines.push(line);
        }

        //------------------------------------------------------------

        lines.push("\nOPTIONS:".into());

        for desc in options {
            let line = format!("{}{}", USAGE_PREFIX_SPACES, desc.option);
            lines.push(line);
        }

        //------------------------------------------------------------

        if !self.schema.help.is_empty() {
            let line = format!("\nHELP:\n\n{}", self.schema.help.trim());
            lines.push(line);
        }

        if !self.schema.notes.is_empty() {
            let line = format!("\nNOTES:\n\n{}", self.schema.notes.trim());
            lines.push(line);
        }

        // Join all the lines together, remove white space at either and and
        // finally append a single newline.
        let mut final_lines = lines.join("\n").trim().to_string();
        final_lines.push('\n');

        writeln!(writer, "{}", final_lines)?;

        Ok(())
    }
}

/// Determine if a help option was parsed as an option (so not after `--`,
/// nor after the first positional argument when stopping early).
fn wants_help(parsed: &Parsed) -> bool {
    HELP_OPTIONS.iter().any(|name| parsed.count(name) > 0)
}
