use clap::Parser;
use miette::MietteHandlerOpts;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use stubgen::{run, AppError, Options, OutputMode};
use stubgen_codegen::{CodegenError, RenameDirective};

#[derive(Parser)]
#[command(
    name = "stubgen",
    version,
    about = "Generate stubbed implementations of Go interfaces",
    long_about = "Stubgen scans Go packages for interface declarations and generates \
stubbed implementations: structs that satisfy each interface, delegate every \
method to an assignable function field, record each invocation, and panic if \
a method is called without a configured implementation."
)]
struct Cli {
    /// Package directories to scan; defaults to the current directory
    #[arg(value_name = "DIR")]
    inputs: Vec<PathBuf>,

    /// Comma-separated list of interface names; defaults to all interfaces
    #[arg(short, long, value_delimiter = ',', value_name = "NAME,...")]
    types: Vec<String>,

    /// Output directory; '-' writes all generated stubs to stdout
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Rename a stub, as 'pkg.StubbedName=NewName' (repeatable)
    #[arg(short, long, value_name = "OLD=NEW")]
    rename: Vec<String>,
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => {}
        Err(report) => {
            eprintln!("{:?}", report);
            process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> miette::Result<()> {
    let inputs = if cli.inputs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.inputs
    };

    let mut renames = Vec::with_capacity(cli.rename.len());
    for directive in &cli.rename {
        renames.push(RenameDirective::parse(directive)?);
    }

    let output = match cli.output.as_deref() {
        Some("-") => OutputMode::Stream,
        Some(dir) => OutputMode::Directory(PathBuf::from(dir)),
        None => OutputMode::InPlace,
    };

    let options = Options {
        inputs,
        types: cli.types,
        output,
        renames,
    };

    let mut stdout = io::stdout().lock();
    run(options, &mut stdout).map_err(|err| {
        // A formatting failure still surfaces the rendered text, so the
        // broken output can be inspected.
        if let AppError::Codegen(CodegenError::Format { unformatted, .. }) = &err {
            let _ = io::stderr().write_all(unformatted.as_bytes());
        }
        miette::Report::new(err)
    })
}

/// Configure miette's fancy report handler.
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}
