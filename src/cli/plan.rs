use std::error::Error;
use crate::{Context, CostFunction, make_transition_graph, enumerate_paths, rank_paths};
use super::{App, Command, ScenarioArgs};

/// Enumerates all loading sequences of a scenario and reports the
/// cheapest ones, first by the number of plates moved, then by their
/// total weight.
pub struct Plan {
    args: ScenarioArgs,
}

impl Plan {
    pub fn new_command(app: &App) -> Box<dyn Command> {
        Box::new(Self { args: ScenarioArgs::from_app(app) })
    }
}

impl Command for Plan {
    fn name_of_log_file(&self) -> String {
        self.args.name_of_log_file()
    }

    fn console_level(&self) -> Option<log::LevelFilter> {
        self.args.console_level()
    }

    fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let scenario = self.args.load()?;
        let mut ctx = Context::new(scenario.get_name());

        let graph = make_transition_graph(&mut ctx, scenario.get_weights(), scenario.get_sequence())?;
        let paths = enumerate_paths(&ctx, graph.get_nodes_by_weight(), graph.get_edges())?;

        println!("Total ways: {}", paths.len());

        if paths.is_empty() {
            warn!("Sequence {:?} can't be completed", scenario.get_sequence());
            return Ok(())
        }

        println!("Sequences that minimize number of plates moved:");

        for path in rank_paths(&paths, CostFunction::Count, scenario.get_top()) {
            println!("{}\t{}\t{}", path.get_count_cost(), path.get_weight_cost(), ctx.with(path));
        }

        println!("Sequences that minimize total weight of plates moved:");

        for path in rank_paths(&paths, CostFunction::Weight, scenario.get_top()) {
            println!("{}\t{}\t{}", path.get_weight_cost(), path.get_count_cost(), ctx.with(path));
        }

        Ok(())
    }
}
