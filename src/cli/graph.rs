use std::error::Error;
use crate::{Context, Multiset, make_transition_graph};
use super::{App, Command, ScenarioArgs};

pub struct Graph {
    args: ScenarioArgs,
}

impl Graph {
    pub fn new_command(app: &App) -> Box<dyn Command> {
        Box::new(Self { args: ScenarioArgs::from_app(app) })
    }
}

fn comma_joined(multiset: &Multiset) -> String {
    multiset.iter().map(|w| w.to_string()).collect::<Vec<_>>().join(",")
}

impl Command for Graph {
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

        for (total, layer) in graph.get_nodes_by_weight().iter() {
            println!("{}: {}", total, ctx.with(layer));
        }

        for edge in graph.get_edges() {
            println!(
                "{} {}",
                comma_joined(ctx.get_multiset_checked(edge.get_source())?),
                comma_joined(ctx.get_multiset_checked(edge.get_target())?),
            );
        }

        Ok(())
    }
}
