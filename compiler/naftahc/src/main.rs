//! Naftah CLI
//!
//! Runs a script, starts a REPL, or dumps tokens/statements for debugging.

use std::io::IsTerminal;

use naftah_eval::Interpreter;
use naftahc::commands::{interpreter_config, lex_file, parse_file, run_file, run_repl, Repl};

fn main() {
    naftahc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        start_repl();
        return;
    };

    match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: naftah run <file.naftah>");
                std::process::exit(1);
            };
            run_file(path);
        }
        "repl" => start_repl(),
        "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: naftah lex <file.naftah>");
                std::process::exit(1);
            };
            lex_file(path);
        }
        "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: naftah parse <file.naftah>");
                std::process::exit(1);
            };
            parse_file(path);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-v" => {
            println!("Naftah {}", env!("CARGO_PKG_VERSION"));
        }
        // Anything else is taken as a script path.
        path => run_file(path),
    }
}

fn start_repl() {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut repl = Repl::new(Interpreter::with_config(interpreter_config()));
    if let Err(e) = run_repl(
        &mut repl,
        stdin.lock(),
        std::io::stdout(),
        std::io::stderr(),
        interactive,
    ) {
        eprintln!("خطأ في الإدخال: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Naftah interpreter");
    println!();
    println!("Usage: naftah [command] [file]");
    println!();
    println!("Commands:");
    println!("  <file>              Run a Naftah program");
    println!("  run <file>          Run a Naftah program");
    println!("  repl                Start the line REPL (default with no arguments)");
    println!("  lex <file>          Tokenize and display tokens");
    println!("  parse <file>        Parse and display top-level statements");
    println!("  help                Show this help message");
    println!("  version             Show version information");
    println!();
    println!("Environment:");
    println!("  NAFTAH_MISSING_KEY  null (default) or verbatim: how ${{name}} renders a missing name");
    println!("  RUST_LOG            Enable tracing output, e.g. RUST_LOG=naftah_eval=debug");
    println!();
    println!("In the REPL, type :خروج or send EOF to leave.");
}
