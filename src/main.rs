use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use std::error::Error;

use crate::{
    fs::{config::FsConfig, FileSystem},
    shell::start_shell,
};

mod disk;
mod fs;
mod logger;
mod shell;
mod utils;

fn main() {
    if let Err(e) = run() {
        eprintln!("block-fs: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let matches = App::new("block-fs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("In-memory block file system simulator")
        .arg(
            Arg::with_name("block-size")
                .long("block-size")
                .takes_value(true)
                .help("Bytes per block (default 128)"),
        )
        .arg(
            Arg::with_name("blocks")
                .long("blocks")
                .takes_value(true)
                .help("Number of blocks on the disk (default 1024)"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .help("off, error, warn, info, debug or trace (default warn, or $MINIFS_LOG)"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Skip the boot animation"),
        )
        .get_matches();

    let level = match matches.value_of("log-level") {
        Some(level) => level.to_string(),
        None => std::env::var("MINIFS_LOG").unwrap_or_else(|_| "warn".to_string()),
    };
    let level: LevelFilter = level
        .parse()
        .map_err(|_| format!("invalid log level '{}'", level))?;
    logger::init(level)?;

    let config = config_from_args(&matches)?;
    let fs = FileSystem::new(config)?;
    start_shell(fs, !matches.is_present("quiet"));
    Ok(())
}

fn config_from_args(matches: &ArgMatches) -> Result<FsConfig, Box<dyn Error>> {
    let mut config = FsConfig::default();
    if let Some(size) = matches.value_of("block-size") {
        config.block_size = size
            .parse()
            .map_err(|e| format!("invalid --block-size '{}': {}", size, e))?;
    }
    if let Some(blocks) = matches.value_of("blocks") {
        config.total_blocks = blocks
            .parse()
            .map_err(|e| format!("invalid --blocks '{}': {}", blocks, e))?;
    }
    Ok(config)
}
