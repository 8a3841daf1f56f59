// src/lib.rs

pub mod assign;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod fleet;
pub mod logging;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{resolve_config, SimConfig};
use crate::engine::{
    initialize_run, run_headless, FrameDriver, ResultStore, RunSetup, Simulation, SimulationRun,
};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - run setup (graphs, fleets, assignment)
/// - the headless or real-time frame driver
/// - result recording and optional JSON export
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref(), args.overrides())?;
    let setup = initialize_run(&cfg.run_params());

    if args.dry_run {
        print_dry_run(&cfg, &setup);
        return Ok(());
    }

    let simulation = Simulation::new(setup, cfg.build_clock());
    let simulation = if args.realtime {
        FrameDriver::new(simulation, cfg.clock().frame_rate).run().await?
    } else {
        let mut simulation = simulation;
        run_headless(&mut simulation, args.frame_dt)?;
        simulation
    };

    let mut store = ResultStore::new();
    store.record_all(simulation.finalize());
    info!(runs = store.len(), "simulation finished");

    print_summary(&simulation, store.iter());

    if let Some(path) = args.output.as_deref() {
        store.write_json(path)?;
    }

    Ok(())
}

/// Dry-run output: print the configuration and each algorithm's graph and
/// fleet without advancing the clock.
fn print_dry_run(cfg: &SimConfig, setup: &RunSetup) {
    println!("wfsim dry-run");
    println!("  workflow = {} ({})", setup.profile.key, setup.profile.name);
    println!("  deadline_factor = {}", setup.deadline_factor);
    println!("  deadline = {:.2}s", setup.deadline);
    println!("  seed = {}", cfg.simulation().seed);
    println!(
        "  clock = speed {} (fast_forward: {})",
        cfg.clock().speed,
        cfg.clock().fast_forward
    );
    println!();

    for (algorithm, graph) in &setup.tasks_by_algorithm {
        println!(
            "{algorithm}: {} tasks, {} levels, {} dependencies",
            graph.len(),
            graph.level_count(),
            graph.dependency_count()
        );

        if let Some(vms) = setup.vms_by_algorithm.get(algorithm) {
            for vm in vms {
                println!(
                    "  - {} [{}] {} tasks",
                    vm.id,
                    vm.tier_name,
                    vm.task_ids.len()
                );
            }
        }

        for task in graph.tasks() {
            let deps: Vec<String> = task.dependencies.iter().map(|d| d.to_string()).collect();
            println!(
                "    {} L{} rank {} runtime {:.2}s [{:.2}, {:.2}] on {}{}",
                task.id,
                task.level,
                task.rank,
                task.runtime_secs,
                task.start_time,
                task.end_time,
                task.assigned_vm.as_deref().unwrap_or("-"),
                if deps.is_empty() {
                    String::new()
                } else {
                    format!(" after {}", deps.join(","))
                }
            );
        }
    }

    debug!("dry-run complete (no simulation)");
}

fn print_summary<'a>(simulation: &Simulation, runs: impl Iterator<Item = &'a SimulationRun>) {
    println!(
        "{} ({} tasks) deadline {:.2}s, finished at {:.2}s{}",
        simulation.profile().name,
        simulation
            .runs()
            .first()
            .map(|r| r.graph.len())
            .unwrap_or(0),
        simulation.deadline(),
        simulation.now(),
        if simulation.failsafe_triggered() {
            " (failsafe)"
        } else {
            ""
        }
    );

    for run in runs {
        println!(
            "  {:<6} time {:>10.2}s  cost ${:<10.5} vms {:>3}  deadline {}{}",
            run.algorithm.tag(),
            run.completion_time_secs,
            run.total_cost,
            run.vm_count,
            if run.meets_deadline { "met" } else { "missed" },
            if run.force_completed { " (forced)" } else { "" }
        );
    }
}
