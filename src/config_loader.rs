use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    // Parse the YAML content
    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    info!(
        "Network size {}, protocol '{}', seed {}",
        config.general.network_size, config.peer_initializer.protocol, config.general.random_seed
    );

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Replace the configured seed, e.g. from the command line
pub fn apply_seed_override(config: &mut Config, seed: Option<u64>) -> Result<()> {
    if let Some(seed) = seed {
        info!(
            "Overriding random seed {} with {}",
            config.general.random_seed, seed
        );
        config.general.random_seed = seed;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
general:
  network_size: 50
  random_seed: 3
  log_level: debug
peer_initializer:
  protocol: "peer"
  reachable_count: 10
  out_peers_legacy: 4
  out_peers_recon: 4
  in_relay_delay_recon_peer: "0ms"
  out_relay_delay_recon_peer: "0ms"
  in_relay_delay_legacy_peer: "500ms"
  out_relay_delay_legacy_peer: "250ms"
  reconcile_percent: 0
"#;

    #[test]
    fn test_load_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", YAML).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.general.network_size, 50);
        assert_eq!(config.general.log_level.as_deref(), Some("debug"));
        assert_eq!(config.peer_initializer.reconciliation_interval, None);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", YAML.replace("reachable_count: 10", "reachable_count: 50")).unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("/nonexistent/txrelaysim.yaml")).is_err());
    }

    #[test]
    fn test_apply_seed_override() {
        let mut config: Config = serde_yaml::from_str(YAML).unwrap();

        apply_seed_override(&mut config, None).unwrap();
        assert_eq!(config.general.random_seed, 3);

        apply_seed_override(&mut config, Some(1234)).unwrap();
        assert_eq!(config.general.random_seed, 1234);
    }
}
