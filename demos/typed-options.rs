// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how a handler can accept an options struct.
use argbind::{
    Bindings, Command, CommandSchema, FromBindings, HandlerKey, OptionSchema, Registry, Result,
};

#[derive(Clone, Debug)]
struct BuildOptions {
    jobs: usize,
    out: String,
    release: bool,
}

impl FromBindings for BuildOptions {
    fn from_bindings(args: &Bindings) -> Result<Self> {
        Ok(BuildOptions {
            jobs: args.number("jobs")? as usize,
            out: args.text("out")?.into(),
            release: args.flag("release")?,
        })
    }
}

struct Builder;

fn build(opts: BuildOptions) -> Result<()> {
    let mode = if opts.release { "release" } else { "debug" };

    println!(
        "INFO: building {} into {:?} using {} job(s)",
        mode, opts.out, opts.jobs
    );

    Ok(())
}

fn main() -> Result<()> {
    let key = HandlerKey::of::<Builder>("build");
    let registry = Registry::new();

    registry.register(
        &key,
        0,
        OptionSchema::number("jobs")
            .alias("j")
            .with_default(1)
            .help("number of parallel jobs"),
    )?;
    registry.register(
        &key,
        1,
        OptionSchema::text("out")
            .alias("o")
            .required()
            .help("output directory"),
    )?;
    registry.register(&key, 2, OptionSchema::flag("release").alias("r"))?;

    let mut cmd = Command::builder(&registry, key)
        .schema(CommandSchema::new().name("typed-options"))
        .typed(build)
        .build()?;

    cmd.generate_help(&mut std::io::stdout())?;

    cmd.run()
}
