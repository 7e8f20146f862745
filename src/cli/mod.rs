mod plan;
mod graph;
mod ways;

use std::{path::PathBuf, error::Error};
use crate::{Scenario, parse_weights};

pub use plan::Plan;
pub use graph::Graph;
pub use ways::Ways;

pub trait Command {
    fn name_of_log_file(&self) -> String;

    fn console_level(&self) -> Option<log::LevelFilter> {
        None
    }

    fn run(&mut self) -> Result<(), Box<dyn Error>>;
}

pub struct App<'a> {
    app_name: String,
    bin_name: Option<String>,
    cli_args: clap::ArgMatches<'a>,
}

impl<'a> App<'a> {
    pub fn from_clap<'b>(clap_app: clap::App<'a, 'b>) -> Self {
        let cli_app = clap_app
            .name(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .author(env!("CARGO_PKG_AUTHORS"))
            .about(env!("CARGO_PKG_DESCRIPTION"));

        let app_name = cli_app.get_name().to_owned();
        let bin_name = cli_app.get_bin_name().map(|s| s.to_owned());
        let cli_args = cli_app.get_matches();

        Self { app_name, bin_name, cli_args }
    }

    pub fn get_name(&self) -> &str {
        self.app_name.as_str()
    }

    pub fn get_bin_name(&self) -> Option<&str> {
        self.bin_name.as_deref()
    }

    pub fn subcommand_name(&self) -> Option<&str> {
        self.cli_args.subcommand_name()
    }

    pub fn value_of<S: AsRef<str>>(&self, key: S) -> Option<&str> {
        self.cli_args.subcommand().1.unwrap_or(&self.cli_args).value_of(key)
    }

    pub fn occurrences_of<S: AsRef<str>>(&self, key: S) -> u64 {
        self.cli_args.subcommand().1.unwrap_or(&self.cli_args).occurrences_of(key)
    }

    pub fn is_present<S: AsRef<str>>(&self, key: S) -> bool {
        self.cli_args.subcommand().1.unwrap_or(&self.cli_args).is_present(key)
    }
}

/// Scenario-related arguments shared by all commands.
///
/// The scenario is loaded only when a command runs, so that loading
/// errors get logged.
#[derive(Debug)]
pub(crate) struct ScenarioArgs {
    verbosity:     u64,
    scenario_path: Option<String>,
    weights:       Option<String>,
    sequence:      Option<String>,
    top:           Option<String>,
}

impl ScenarioArgs {
    pub(crate) fn from_app(app: &App) -> Self {
        ScenarioArgs {
            verbosity:     app.occurrences_of("verbose"),
            scenario_path: app.value_of("SCENARIO").map(String::from),
            weights:       app.value_of("WEIGHTS").map(String::from),
            sequence:      app.value_of("SEQUENCE").map(String::from),
            top:           app.value_of("TOP").map(String::from),
        }
    }

    pub(crate) fn load(&self) -> Result<Scenario, Box<dyn Error>> {
        let mut scenario = if let Some(ref path) = self.scenario_path {
            info!("Loading scenario from \"{}\"", path);
            Scenario::from_file(path)?
        } else {
            Scenario::default()
        };

        if let Some(ref weights) = self.weights {
            scenario.set_weights(parse_weights(weights)?);
        }

        if let Some(ref sequence) = self.sequence {
            scenario.set_sequence(parse_weights(sequence)?);
        }

        if let Some(ref top) = self.top {
            scenario.set_top(top.parse()?);
        }

        scenario.validate()?;

        debug!(
            "Scenario '{}': weights {:?}, sequence {:?}",
            scenario.get_name(),
            scenario.get_weights(),
            scenario.get_sequence()
        );

        Ok(scenario)
    }

    pub(crate) fn name_of_log_file(&self) -> String {
        if let Some(ref path) = self.scenario_path {
            let mut path = PathBuf::from(path);

            if path.set_extension("log") {
                if let Some(file_name) = path.file_name().and_then(|s| s.to_str()) {
                    return file_name.to_owned()
                }
            }
        }

        "plates.log".to_owned()
    }

    pub(crate) fn console_level(&self) -> Option<log::LevelFilter> {
        Some(match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
    }
}
