#![allow(clippy::toplevel_ref_arg)]

use std::error::Error;
use plates::{Logger, cli::{App, Command, Plan, Graph, Ways}};

fn main() -> Result<(), Box<dyn Error>> {
    let ref cli_spec_str = include_str!("plates.cli");

    let cli_spec = clap::YamlLoader::load_from_str(cli_spec_str)?;
    let cli_matches = clap::App::from_yaml(&cli_spec[0]);
    let app = App::from_clap(cli_matches);

    let mut command: Box<dyn Command> = match app.subcommand_name().unwrap_or("plan") {
        "plan" => Plan::new_command(&app),
        "graph" => Graph::new_command(&app),
        "ways" => Ways::new_command(&app),
        _ => unreachable!(),
    };

    let console_level = command.console_level().unwrap_or(log::LevelFilter::Warn);
    let mut logger = Logger::new(app.get_name()).with_console(console_level);

    if let Some(dirname) = app.value_of("LOG_DIR") {
        logger = logger.with_log_dir(dirname, command.name_of_log_file(), log::LevelFilter::Debug);
    }

    logger.apply();

    if let Err(err) = command.run() {
        eprintln!("[ERROR] {}.", err);
        std::process::exit(-1)
    } else {
        std::process::exit(0)
    }
}
