use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Log level for a count of `-v` flags
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Sends log output to stderr so it never mixes with converted data.
pub fn log_init(verbose: u8) {
    let term = TermLogger::init(
        level_for(verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    // Fails only if a logger is already set
    if let Err(e) = term {
        eprintln!("logger already initialized: {}", e);
    }
}
