use std::path::PathBuf;

use proscale_core::ProscaleConfig;
use proscale_engine::AutoscaleController;

pub fn run(
    current_load: f64,
    forecast_load: f64,
    replicas: u32,
    config: Option<PathBuf>,
    format: &str,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => ProscaleConfig::from_file(&path)?,
        None => ProscaleConfig::default(),
    };

    let mut controller = AutoscaleController::new(config.scaling_policy()?)?;
    let result = controller.decide(current_load, forecast_load, replicas);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!(
                "action: {:?}  replicas: {} -> {}",
                result.action, replicas, result.replicas
            );
            println!(
                "targets: predictive={} reactive={}  cooldown_remaining={}",
                result.predictive_target, result.reactive_target, result.cooldown_remaining
            );
        }
    }

    Ok(())
}
