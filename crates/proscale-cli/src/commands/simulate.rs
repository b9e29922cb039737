use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use proscale_core::{LoadSample, ProscaleConfig, TickReport};
use proscale_sim::{ReplayFeed, ShiftedForecast, Simulation, TrafficGenerator, TrafficPattern};

pub struct SimulateArgs {
    pub config: Option<PathBuf>,
    pub steps: Option<u64>,
    pub pattern: Option<String>,
    pub initial_replicas: Option<u32>,
    pub replay: Option<PathBuf>,
    pub format: String,
    pub tick_ms: Option<u64>,
}

pub async fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ProscaleConfig::from_file(path)?,
        None => ProscaleConfig::default(),
    };
    let sim_section = config.simulation.clone().unwrap_or_default();

    let initial_replicas = args
        .initial_replicas
        .or(sim_section.initial_replicas)
        .unwrap_or(5);

    let samples: Vec<LoadSample> = match &args.replay {
        Some(path) => {
            let feed = ReplayFeed::from_json_file(path)?;
            info!(trace = %path.display(), ticks = feed.len(), "replaying trace");
            feed.collect()
        }
        None => {
            let steps = args.steps.or(sim_section.steps).unwrap_or(200);
            let pattern: TrafficPattern = args
                .pattern
                .or(sim_section.pattern)
                .unwrap_or_else(|| "daily".to_string())
                .parse()?;
            let generator = TrafficGenerator::new(pattern);
            // Horizon 1 with a slight under-bias, like a real forecaster
            // trailing a spike.
            ShiftedForecast::new(generator, 1, 0.9).samples(steps)
        }
    };

    let mut sim = Simulation::new(
        config.scaling_policy()?,
        config.anomaly_policy()?,
        config.cost_model()?,
        initial_replicas,
    )?;

    let mut reports = Vec::with_capacity(samples.len());
    if let Some(tick_ms) = args.tick_ms {
        // Paced mode: one tick per interval, ctrl-c stops early.
        let interval = Duration::from_millis(tick_ms);
        for sample in samples {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let report = sim.step(sample);
                    print_tick(&report, &args.format)?;
                    reports.push(report);
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, stopping simulation");
                    break;
                }
            }
        }
    } else {
        for sample in samples {
            let report = sim.step(sample);
            print_tick(&report, &args.format)?;
            reports.push(report);
        }
    }

    let summary = sim.summarize(&reports);
    match args.format.as_str() {
        "json" => {
            println!(
                "{}",
                serde_json::json!({
                    "ticks": summary.ticks,
                    "scale_outs": summary.scale_outs,
                    "scale_ins": summary.scale_ins,
                    "cooldown_blocks": summary.cooldown_blocks,
                    "anomalies": summary.anomalies,
                    "final_replicas": summary.final_replicas,
                    "autoscaled_cost": summary.autoscaled_cost,
                    "fixed_cost": summary.fixed_cost,
                    "savings_pct": summary.savings_pct,
                })
            );
        }
        _ => {
            println!("---");
            println!(
                "{} ticks: {} scale-outs, {} scale-ins, {} cooldown vetoes, {} anomalies",
                summary.ticks,
                summary.scale_outs,
                summary.scale_ins,
                summary.cooldown_blocks,
                summary.anomalies
            );
            println!(
                "cost: {:.2} autoscaled vs {:.2} fixed ({:+.1}% savings), final fleet {}",
                summary.autoscaled_cost,
                summary.fixed_cost,
                summary.savings_pct,
                summary.final_replicas
            );
        }
    }

    Ok(())
}

fn print_tick(report: &TickReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string(report)?),
        _ => println!(
            "tick {:>4}  load {:>8.1}  forecast {:>8.1}  replicas {:>3}  {:?}  util {:>5.1}%  {:?}",
            report.tick,
            report.current_load,
            report.forecast_load,
            report.decision.replicas,
            report.decision.action,
            report.cpu_utilization * 100.0,
            report.anomaly
        ),
    }
    Ok(())
}
