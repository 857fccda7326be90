// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Bind command-line options to the parameters of a handler.
//!
//! Rather than parsing the command-line inside your handler, declare an
//! option for each parameter the handler needs. When the handler is
//! invoked, the command-line is parsed, each value is checked against the
//! type declared for it and the handler is called with the result.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Examples](#examples)
//! * [Details](#details)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! There are two parts to binding options:
//!
//! - Registering an [OptionSchema] for each handler parameter in a
//!   [Registry]. Each registration records the parameter position, the type
//!   of value it needs ([OptionType]) and how the option is specified on
//!   the command-line.
//!
//! - Creating a [Command] for the handler. Each time the command is
//!   invoked, it reads the options registered for the handler, parses the
//!   command-line and calls the handler with the [Bindings].
//!
//! # Quickstart
//!
//! 1. Identify the handler with a [HandlerKey]: the type that owns the
//!    handler and the handler's name.
//!
//!    ```rust
//!    # use argbind::HandlerKey;
//!    #
//!    struct MyTool;
//!
//!    let key = HandlerKey::of::<MyTool>("run");
//!    ```
//!
//! 1. Register an option for each parameter of the handler.
//!
//!    As a minimum, you must specify a name and a type for the option.
//!
//!    ```rust
//!    # use argbind::{HandlerKey, OptionSchema, Registry, Result};
//!    #
//!    # fn main() -> Result<()> {
//!    # struct MyTool;
//!    # let key = HandlerKey::of::<MyTool>("run");
//!    let registry = Registry::new();
//!
//!    // Parameter 0 is set using "--name <value>".
//!    registry.register(&key, 0, OptionSchema::text("name"))?;
//!
//!    // Parameter 1 is set using "--verbose" or "-v".
//!    registry.register(&key, 1, OptionSchema::flag("verbose").alias("v"))?;
//!    # Ok(())
//!    # }
//!    ```
//!
//! 1. Create a [Command] for the handler and invoke it:
//!
//!    ```rust
//!    # use argbind::{Command, CommandSchema, HandlerKey, OptionSchema, Registry, Result};
//!    #
//!    # fn main() -> Result<()> {
//!    # struct MyTool;
//!    # let key = HandlerKey::of::<MyTool>("run");
//!    # let registry = Registry::new();
//!    # registry.register(&key, 0, OptionSchema::text("name"))?;
//!    # registry.register(&key, 1, OptionSchema::flag("verbose").alias("v"))?;
//!    #
//!    let mut cmd = Command::builder(&registry, key)
//!        .schema(CommandSchema::new().argv(&["--name", "foo", "-v"]))
//!        .handler_fn(|args| {
//!            assert_eq!(args.text("name")?, "foo");
//!            assert_eq!(args.flag("verbose")?, true);
//!
//!            Ok(())
//!        })
//!        .build()?;
//!
//!    cmd.run()?;
//!    # Ok(())
//!    # }
//!    ```
//!
//!    If the schema does not specify the arguments, the arguments the
//!    program was run with are used.
//!
//! # Examples
//!
//! Handlers can accept a single options `struct` by implementing
//! [FromBindings] for it:
//!
//! ```rust
//! use argbind::{
//!     Bindings, Command, CommandSchema, FromBindings, HandlerKey, OptionSchema, Registry,
//!     Result,
//! };
//!
//! #[derive(Debug)]
//! struct Options {
//!     jobs: f64,
//!     out: String,
//! }
//!
//! impl FromBindings for Options {
//!     fn from_bindings(args: &Bindings) -> Result<Self> {
//!         Ok(Options {
//!             jobs: args.number("jobs")?,
//!             out: args.text("out")?.into(),
//!         })
//!     }
//! }
//!
//! struct Build;
//!
//! fn main() -> Result<()> {
//!     let key = HandlerKey::of::<Build>("run");
//!     let registry = Registry::new();
//!
//!     registry.register(&key, 0, OptionSchema::number("jobs").alias("j").with_default(1))?;
//!     registry.register(&key, 1, OptionSchema::text("out").required())?;
//!
//!     let mut cmd = Command::builder(&registry, key)
//!         .schema(CommandSchema::new().argv(&["-j", "8", "--out=target"]))
//!         .typed(|opts: Options| {
//!             println!("building into {} using {} jobs", opts.out, opts.jobs);
//!
//!             Ok(())
//!         })
//!         .build()?;
//!
//!     cmd.run()
//! }
//! ```
//!
//! For further examples, try out the programs in the `demos/` directory:
//!
//! ```bash
//! $ cargo run --example simple -- --name foo -v --count 3
//! $ cargo run --example typed-options -- -j 4 --out /tmp/build
//! $ cargo run --example error-handler -- --count lots
//! ```
//!
//! # Details
//!
//! ## Types
//!
//! | [OptionType] | Value if not specified | Notes |
//! |-|-|-|
//! | [OptionType::Text] | `""` | The value is never converted to a number. |
//! | [OptionType::Number] | `0` | The value must look like a number. |
//! | [OptionType::Flag] | `false` | `--name` sets `true`, `--no-name` sets `false`. |
//!
//! If the value found for an option is not of the registered type, the
//! invocation fails with [Error::TypeMismatch] and the handler is not
//! called.
//!
//! ## Positions
//!
//! Values are stored at the registered parameter position in the
//! [Bindings], whatever order the options were registered in. Positions
//! that no option is registered for keep the value the command was invoked
//! with (see [Command::invoke()]).
//!
//! Registering an option for a position that already has one replaces it.
//!
//! ## Syntax
//!
//! - Long options: `--name value`, `--name=value`, `--no-name`.
//! - Short options: `-n value`, `-n5`, `-n=5`, and bundled flags (`-abc`).
//! - `--` ends option processing.
//!
//! # Limitations
//!
//! - Only string, numeric and boolean options are supported.
//! - Positional arguments cannot be bound to parameters (but see
//!   [Bindings::rest()]).
//! - Sub-commands are not supported.
//! - A [Registry] cannot be shared between threads.

mod command;
mod compile;
mod error;
mod option;
mod parser;
mod registry;
mod value;

pub use error::{Error, Result};

pub use command::{
    Bindings, Command, CommandBuilder, CommandSchema, FromBindings, Handler, Settings,
};
pub use compile::compile;
pub use option::{OptionSchema, ParameterDescriptor};
pub use parser::{get_args, parse, Parsed, ParserConfig};
pub use registry::{HandlerKey, Registry, MAX_POSITION};
pub use value::{OptionType, Value};
