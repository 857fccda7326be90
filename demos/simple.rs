// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A simple example showing how to bind options to a handler.
use argbind::{
    Bindings, Command, CommandSchema, Handler, HandlerKey, OptionSchema, Registry, Result,
    Settings,
};
use tracing_subscriber::EnvFilter;

/// The type whose "greet" handler the options are bound to.
#[derive(Clone, Debug, Default)]
struct Greeter {
    // Number of times the handler was called.
    calls: usize,
}

impl Handler for &mut Greeter {
    fn handle(&mut self, args: Bindings) -> Result<()> {
        self.calls += 1;

        println!("INFO: Greeter: args: {:?}", args.args());

        let name = args.text("name")?;
        let name = if name.is_empty() { "world" } else { name };

        let count = args.number("count")? as usize;

        for _ in 0..count {
            println!("hello, {}", name);
        }

        if args.flag("verbose")? {
            println!("INFO: unparsed arguments: {:?}", args.rest());
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key = HandlerKey::of::<Greeter>("greet");
    let registry = Registry::global();

    // Support "--name <value>".
    registry.register(&key, 0, OptionSchema::text("name").help("who to greet"))?;

    // Support "--count <value>" and "-c <value>".
    registry.register(
        &key,
        1,
        OptionSchema::number("count").alias("c").with_default(1),
    )?;

    // Support "--verbose" and "-v" flags.
    registry.register(&key, 2, OptionSchema::flag("verbose").alias("v"))?;

    let mut greeter = Greeter::default();

    let schema = CommandSchema::new()
        .name("simple")
        .summary("Greet someone")
        .settings(Settings::new().auto_help());

    let mut cmd = Command::builder(&registry, key)
        .schema(schema)
        .handler(&mut greeter)
        .build()?;

    // Parse the command-line and call the handler
    let result = cmd.run();

    // XXX: essential!
    drop(cmd);

    println!("INFO: handler called {} time(s)", greeter.calls);

    result
}
