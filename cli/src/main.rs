mod demo;
mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use interpreter::memory::format_number;
use interpreter::{LoadError, Memory};

use crate::demo::Demo;

const SUBCOMMANDS: &[&str] = &["run", "test", "demo", "help"];

#[derive(Parser)]
#[command(name = "procdsl", version, about = "Run programs built from state-threading instructions")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log at debug level (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program file
    Run(RunArgs),

    /// Run .test.toml test files
    Test(TestArgs),

    /// Run a built-in demo
    Demo(DemoArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// TOML program file to execute
    file: String,

    /// Override a variable of the initial memory. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, f64)>,

    /// Load only, don't execute (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the loaded program
    #[arg(long)]
    dump: bool,

    /// Don't print the final memory (just check for errors)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.toml file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(clap::Args)]
struct DemoArgs {
    #[arg(value_enum, default_value_t = Demo::Counter)]
    demo: Demo,
}

fn main() {
    // `procdsl file.toml` works like `procdsl run file.toml`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().skip(1).position(|a| !a.starts_with('-')) {
        if !SUBCOMMANDS.contains(&args[pos + 1].as_str()) {
            args.insert(pos + 1, "run".to_string());
        }
    }

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose, cli.no_color);

    match cli.command {
        Command::Run(run_args) => do_run(run_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
        Command::Demo(demo_args) => print!("{}", demo::run_demo(demo_args.demo)),
    }
}

/// A usable RUST_LOG wins outright; otherwise `--verbose` picks debug over info.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn init_logging(verbose: bool, no_color: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

fn do_run(args: RunArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let program = match interpreter::load_program(&source, file_id) {
        Ok(p) => p,
        Err(error) => {
            emit_load_error(&files, &error, color_choice);
            process::exit(1);
        }
    };

    if args.check {
        eprintln!("ok: {} loaded successfully", args.file);
        return;
    }

    if args.dump {
        println!("{:#?}", program);
        return;
    }

    let overrides: Memory = args.set.into_iter().collect();
    tracing::debug!(file = %args.file, overrides = %overrides, "running");

    match interpreter::execute_program_with(&program, overrides) {
        Ok(execution) => {
            if !args.quiet {
                for (name, value) in &execution.memory {
                    println!("{} = {}", name, format_number(*value));
                }
            }
        }
        Err(error) => {
            eprintln!("runtime error: {}", error);
            process::exit(1);
        }
    }
}

fn emit_load_error(
    files: &SimpleFiles<String, String>,
    error: &LoadError,
    color_choice: ColorChoice,
) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let diagnostic = error.to_diagnostic();
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
}

/// Parse a `--set name=value` argument.
fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}
