//! Jung command-line interface.

use std::io;

use jung_eval::Interpreter;
use jungc::commands::{run_file, run_repl};
use jungc::{init_tracing, CliError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        None => repl(),
        Some("--version" | "-v" | "version") => {
            println!("jung v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("--help" | "-h" | "help") => {
            print_usage();
            Ok(())
        }
        Some(flag) if flag.starts_with('-') => {
            eprintln!("jung: unknown option '{flag}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
        Some(path) => run_file(path),
    };

    if let Err(err) = result {
        if let Some(report) = err.report() {
            eprintln!("{report}");
        }
        std::process::exit(err.exit_code());
    }
}

fn repl() -> Result<(), CliError> {
    println!("jung v{} (type 'exit' to quit)", env!("CARGO_PKG_VERSION"));
    let mut interp = Interpreter::new();
    run_repl(
        &mut interp,
        io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
}

fn print_usage() {
    println!("Jung scripting language");
    println!();
    println!("Usage: jung [file]");
    println!();
    println!("With no file, starts an interactive session.");
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message");
    println!("  -v, --version    Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Enable tracing output (e.g. RUST_LOG=jung_eval=debug)");
    println!();
    println!("Examples:");
    println!("  jung main.jung");
    println!("  jung");
}
