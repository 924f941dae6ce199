//! Debugging commands: dump the token stream or the parsed statements.

use naftah_lexer::lex;
use naftah_parse::parse;

use super::read_file;

pub fn lex_file(path: &str) {
    let source = read_file(path);
    let tokens = match lex(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {token:?}");
    }
}

/// Print each top-level statement with its position.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let program = match lex(&source).and_then(|tokens| parse(&tokens)) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    };

    println!("Parsed '{}' ({} statements):", path, program.body.len());
    for stmt in program.statements() {
        match &stmt.label {
            Some(label) => println!("  {} [{label}]: {:?}", stmt.position, stmt.kind),
            None => println!("  {}: {:?}", stmt.position, stmt.kind),
        }
    }
}
