use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use proc_exit::prelude::*;

mod args;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let args = args::Args::parse();

    let config_path = copia::find_config_file(args.config.as_deref()).ok_or_else(|| {
        proc_exit::Code::FAILURE.with_message(
            "The configuration file cannot be found.\n\
             Pass the path to it as a command line argument",
        )
    })?;
    let config = copia::Config::from_file(&config_path).with_code(proc_exit::Code::FAILURE)?;

    let (logging_dir, bad_logging_dir) =
        copia::clean_logging_directory(config.logging_directory.as_deref());
    if let Some(outcome) = bad_logging_dir {
        match outcome {
            copia::ValidationOutcome::NotFound => println!("Logging directory does not exist"),
            _ => println!("Logging directory is inaccessible"),
        }
        if let Ok(cwd) = std::env::current_dir() {
            println!("Log file will be created in '{}'", cwd.display());
        }
    }

    init_logging(&args, &config, logging_dir.as_deref()).with_code(proc_exit::Code::FAILURE)?;

    let cancel = copia::CancelToken::new();
    let report = match copia::backup(&config, &cancel) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{e}");
            return Err(proc_exit::Code::FAILURE.with_message(e.to_string()));
        }
    };

    for (path, stats) in &report {
        log::info!(
            "'{}': failed - {}, copied - {} files",
            path.display(),
            stats.failed,
            stats.copied
        );
    }

    Ok(())
}

/// Build the log sink. `-v`/`-q` flags win and log to stderr; otherwise the
/// config decides the threshold and messages are appended to a dated file in
/// the logging directory (falling back to the working directory).
fn init_logging(
    args: &args::Args,
    config: &copia::Config,
    logging_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let cli_verbosity = args.verbose.is_present();
    let filter = if cli_verbosity {
        args.verbose.log_level_filter()
    } else {
        config.logging_level.to_level_filter()
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter);
    builder.format(|buf, record| {
        let level = format!("[{}]", record.level()).to_lowercase();
        writeln!(buf, "[{}]{:8} {}", buf.timestamp(), level, record.args())
    });

    if !cli_verbosity && filter != log::LevelFilter::Off {
        let dir = match logging_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("cannot resolve the working directory")?,
        };
        let file_name = format!("copia_{}.log", chrono::Local::now().format("%Y-%m-%d"));
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(&file_name))
            .context("cannot create log file, try a different logging directory")?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    log::debug!(
        "Destination directory: {}",
        config.destination_directory.display()
    );
    Ok(())
}
