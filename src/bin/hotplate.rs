use anyhow::{Context, Result};
use hotplate::cli::Args;
use hotplate::harness::Timings;
use hotplate::solver::solve;

fn main() -> Result<()> {
    let args = Args::cli_setup("hotplate");
    let config = args
        .solver_config()
        .context("invalid solver configuration")?;

    let mut timings = Timings::with_capacity(args.repetitions);
    for _ in 0..args.repetitions {
        let report = solve(&config).context("solve failed")?;

        println!("Iterations: {} ({})", report.iterations, report.outcome);
        println!(
            "Cells with >= {:.1} degrees: {}",
            report.threshold, report.cells_at_threshold
        );
        println!("{} {:.6}", report.threads, report.elapsed.as_secs_f64());
        timings.push(report.elapsed);
    }

    if let (Some(average), Some(fastest)) = (timings.average(), timings.fastest()) {
        println!("Average Time: {:.6}", average.as_secs_f64());
        println!("Fastest Time: {:.6}", fastest.as_secs_f64());
    }

    args.finish();
    Ok(())
}
