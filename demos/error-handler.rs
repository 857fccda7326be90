// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing binding errors and how to return an error from the
/// handler.
use argbind::{
    Command, CommandSchema, Error, HandlerKey, OptionSchema, Registry, Result, Settings,
};

struct Counter;

fn main() -> Result<()> {
    let key = HandlerKey::of::<Counter>("count");
    let registry = Registry::new();

    // "--count lots" fails to bind since the value is not a number.
    registry.register(&key, 0, OptionSchema::number("count"))?;

    let schema = CommandSchema::new().settings(Settings::new().deny_unknown_options());

    let mut cmd = Command::builder(&registry, key)
        .schema(schema)
        .handler_fn(|args| {
            let count = args.number("count")?;

            // The handler must return `Ok(())` on success, or one of the
            // crates Error::* values on error. If the errors defined are
            // not appropriate, use `Error::HandlerError(string)`.
            if count < 0.0 {
                return Err(Error::HandlerError(format!(
                    "count {} must not be negative",
                    count
                )));
            }

            println!("INFO: count: {}", count);

            Ok(())
        })
        .build()?;

    let result = cmd.run();

    if let Err(e) = &result {
        eprintln!("ERROR: {}", e);
    }

    result
}
