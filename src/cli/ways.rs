use std::error::Error;
use crate::{Context, enumerate_ways_of_weights};
use super::{App, Command, ScenarioArgs};

pub struct Ways {
    args: ScenarioArgs,
}

impl Ways {
    pub fn new_command(app: &App) -> Box<dyn Command> {
        Box::new(Self { args: ScenarioArgs::from_app(app) })
    }
}

impl Command for Ways {
    fn name_of_log_file(&self) -> String {
        self.args.name_of_log_file()
    }

    fn console_level(&self) -> Option<log::LevelFilter> {
        self.args.console_level()
    }

    fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let scenario = self.args.load()?;
        let mut ctx = Context::new(scenario.get_name());

        let ways = enumerate_ways_of_weights(&mut ctx, scenario.get_weights())?;

        println!("{}", ctx.with(&ways));

        Ok(())
    }
}
