use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, LevelFilter};

use atlaskit::utils::logger::Logger;
use atlaskit::commands::{resolve_config, CommandFactory, AtlaskitCommandFactory};

fn main() {
    let matches = ClapCommand::new("AtlasKit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Unpack a texture atlas into separate sprite and nine-patch images")
        .arg(
            Arg::new("input")
                .help("Input .atlas metadata file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory (defaults to <atlas name>_unpacked next to the atlas)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("pages")
                .long("pages")
                .help("Directory containing the page images (defaults to the atlas directory)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file with an [unpack] table")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Log file path")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Print a summary of the atlas instead of unpacking it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = match resolve_config(&matches) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = Logger::init_global_logger(&config.log_file, level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let run_log = format!("{}.run", config.log_file);
    let logger = match Logger::new(&run_log) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = AtlaskitCommandFactory::new();

    let command_result = factory.create_command(&matches, config, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
