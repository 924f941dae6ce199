//! Naftah host embedding.
//!
//! Wires the evaluator to a terminal: a script runner, a line REPL and
//! two debugging commands that dump tokens and statements. Library crates
//! never install a tracing subscriber; this crate does, once, and only
//! when `RUST_LOG` is set.

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber if `RUST_LOG` is set. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
