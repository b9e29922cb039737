use std::path::Path;

use proscale_core::ProscaleConfig;

pub fn run(path: &Path) -> anyhow::Result<()> {
    let output = path.join("proscale.toml");
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }
    let config = ProscaleConfig::scaffold();
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_parseable_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();

        let config = ProscaleConfig::from_file(&dir.path().join("proscale.toml")).unwrap();
        assert!(config.scaling_policy().is_ok());
        assert!(config.anomaly_policy().is_ok());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        assert!(run(dir.path()).is_err());
    }
}
