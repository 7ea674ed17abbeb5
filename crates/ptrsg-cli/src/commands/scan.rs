use ptrsg_core::ChaosLevel;
use ptrsg_core::workloads::{self, helpers};

pub fn run(chaos: ChaosLevel) {
    let selected = workloads::select(chaos);
    println!("Chaos level: {chaos}");
    println!();
    println!("{} workload(s) take part:\n", selected.len());

    let mut missing = 0;
    for w in &selected {
        let info = w.info();
        let tool = info.toolchain.tool();
        match helpers::probe(&tool) {
            Ok(output) => println!(
                "  \u{2705} {:<8} {:<8} {}",
                info.name,
                tool.program,
                helpers::first_line(&output)
            ),
            Err(reason) => {
                missing += 1;
                println!("  \u{274C} {:<8} {:<8} {reason}", info.name, tool.program);
            }
        }
    }

    if missing > 0 {
        println!("\n{missing} tool(s) missing; a run at this chaos level would fail preflight.");
    }
}
