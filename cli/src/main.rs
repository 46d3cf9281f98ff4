mod outline;
mod test_runner;

use std::io;
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flowscript::ValidationError;

const SUBCOMMANDS: &[&str] = &["run", "test", "help"];

#[derive(Parser)]
#[command(name = "fls", version, about = "Workflow script outline tool")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a script outline's declarations in canonical order
    Run(RunArgs),

    /// Run .test.toml fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Outline file (TOML) to load
    file: String,

    /// Validate only, don't print (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the built script node
    #[arg(long)]
    ast: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.toml file or directory containing them
    path: String,
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    init_logging();

    // If the first positional arg is not a known subcommand, inject "run"
    // so `fls file.toml` works like `fls run file.toml`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args
        .iter()
        .skip(1)
        .position(|a| !a.starts_with('-'))
        .map(|p| p + 1)
    {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "run".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Run(run_args) => do_run(run_args, cli.no_color),
        Command::Test(test_args) => {
            let exit_code = test_runner::run_tests(Path::new(&test_args.path), cli.no_color);
            process::exit(exit_code);
        }
    }
}

fn do_run(args: RunArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let (source, outline) = match outline::load(Path::new(&args.file)) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    // Set up codespan file database
    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let script = match outline.build(file_id).finalize() {
        Ok(script) => script,
        Err(errors) => {
            let writer = StandardStream::stderr(color_choice);
            emit_validation_errors(&writer, &files, file_id, &errors);
            process::exit(1);
        }
    };

    if args.check {
        eprintln!("ok: {} is a valid script", args.file);
        return;
    }

    if args.ast {
        println!("{:#?}", *script);
        return;
    }

    if let Some(shebang) = script.shebang() {
        println!("{}", shebang);
    }
    for declaration in script.declarations() {
        println!("{}", declaration);
    }
}

fn emit_validation_errors(
    writer: &StandardStream,
    files: &SimpleFiles<String, String>,
    file_id: usize,
    errors: &[ValidationError],
) {
    let config = term::Config::default();
    for error in errors {
        let diagnostic = error.to_diagnostic(file_id);
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}
