use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count onto the most detailed level that gets written.
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Routes this crate's `tracing` events to `path`, appending. The terminal
/// UI owns stdout, so nothing is written to the console. `RUST_LOG` can add
/// directives for other crates.
pub fn init(path: &Path, verbose: u8) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directive = format!("flashcard_generator={}", level_for(verbose))
        .parse()
        .map_err(io::Error::other)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)
}
