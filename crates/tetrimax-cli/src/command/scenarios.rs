use crate::{agent::AgentArg, scenario};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScenariosArg {
    #[clap(flatten)]
    pub(crate) agent: AgentArg,
}

pub(crate) fn run(arg: &ScenariosArg) -> anyhow::Result<()> {
    let agent = arg.agent.build()?;
    println!("Running scenarios for: {}", agent.name());

    let scenarios = scenario::all();
    let mut passed = 0;
    for (i, scenario) in scenarios.iter().enumerate() {
        println!();
        println!("=== TEST {}: {} ===", i + 1, scenario.name);
        println!("goal: {}", scenario.goal);

        let report = scenario.run(agent.as_ref())?;
        println!("initial board state:");
        println!("{}", report.before.board());
        println!("queue: {:?}", report.before.queue());

        let Some(action) = report.action else {
            println!("FAILURE: agent returned no move");
            continue;
        };
        println!("agent chose: {action}");
        if let Some(after) = &report.after {
            println!("resulting board:");
            println!("{}", after.board());
            println!("Lines Cleared Total: {}", after.lines_cleared());
        }

        if report.passed {
            passed += 1;
            println!("SUCCESS");
        } else {
            println!("FAILURE");
        }
    }

    println!();
    println!("{passed}/{} scenarios passed", scenarios.len());
    Ok(())
}
