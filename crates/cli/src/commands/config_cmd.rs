//! `rudder config` — Configuration management commands.

use super::context::Overrides;
use rudder_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   Config parsed successfully");

            let mut warnings = Vec::new();

            if !config.steering.enabled {
                warnings.push("Steering is disabled; no steering files will be injected");
            }

            if config.steering.max_bytes == 0 {
                warnings.push("steering.max_bytes is 0; every steering file will be omitted");
            }

            if !config.instructions.load_global && !config.instructions.load_project {
                warnings.push("Both instruction blocks are disabled");
            }

            if warnings.is_empty() {
                println!("   All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   warning: {w}");
                }
            }

            println!();
            println!("   Steering:  {}", if config.steering.enabled { "enabled" } else { "disabled" });
            println!("   Budget:    {} bytes", config.steering.max_bytes);
        }
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    overrides.apply(&mut config)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
