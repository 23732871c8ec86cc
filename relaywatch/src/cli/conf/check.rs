use owo_colors::OwoColorize;
use relaywatch_core::conf::{ConfigError, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    let mut cfg = match load_config(&path) {
        Ok(cfg) => cfg,
        Err(err) => fail(&err, plain),
    };

    let warnings = cfg.normalize();
    let events = match cfg.event_categories() {
        Ok(events) => events,
        Err(err) => fail(&err, plain),
    };

    println!("{} Config loaded successfully", mark("✔", plain));
    println!("{} {} event types logged", mark("✔", plain), events.len());
    println!("{} {} filter patterns", mark("✔", plain), cfg.regex.len());
    match &cfg.log_file {
        Some(log_file) => println!("{} saving events to {}", mark("✔", plain), log_file.display()),
        None => println!("{} events are not saved", mark("✔", plain)),
    }

    for warning in &warnings {
        if plain {
            println!("warning: {warning}");
        } else {
            println!("{} {}", "⚠".yellow(), warning);
        }
    }

    Ok(())
}

fn mark(symbol: &str, plain: bool) -> String {
    if plain {
        symbol.to_string()
    } else {
        symbol.green().to_string()
    }
}

fn fail(err: &ConfigError, plain: bool) -> ! {
    if plain {
        eprintln!("{err}");
    } else {
        eprintln!("{} {}", "✘".red(), err);
    }
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
    std::process::exit(1);
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidEvents { .. } => Some(
            "Events are given as flags, run `relaywatch events` for the list.\n\
             \n\
             Example:\n\
             \n\
             events: \"N3bc\"",
        ),

        ConfigError::Parse { .. } => Some(
            "Every key is optional. Unknown keys are rejected.\n\
             \n\
             Run `relaywatch config dump` on an empty file to see them all.",
        ),

        ConfigError::ReadFile { .. } => None,
    }
}
