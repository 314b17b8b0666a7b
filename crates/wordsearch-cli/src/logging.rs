use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Sets up `env_logger` for the whole process.
///
/// The default level is `warn`, or `debug` with `verbose`; `RUST_LOG` overrides
/// both. With `log_file` the records go to that file. Without one, a command
/// that owns the terminal (`owns_terminal`) runs with no logger at all.
pub fn init(verbose: bool, log_file: Option<&Path>, owns_terminal: bool) -> anyhow::Result<()> {
    let target = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            Target::Pipe(Box::new(file))
        }
        None if owns_terminal => return Ok(()),
        None => Target::Stderr,
    };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .format_module_path(false)
        .target(target);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder
        .try_init()
        .context("Failed to initialize the logger")?;

    log::debug!("logger initialized at {level} level");
    Ok(())
}
