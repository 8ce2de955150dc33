//! `rudder onboard` — First-time setup.

use rudder_config::AppConfig;
use rudder_core::Error;
use rudder_steering::scope::GLOBAL_STEERING_DIR;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();
    let steering_dir = config_dir.join(GLOBAL_STEERING_DIR);

    println!("Rudder — First-Time Setup");
    println!("=========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).map_err(|e| Error::io(&config_dir, e))?;
        println!("Created home directory: {}", config_dir.display());
    } else {
        println!("  Home directory exists: {}", config_dir.display());
    }

    if !steering_dir.exists() {
        std::fs::create_dir_all(&steering_dir).map_err(|e| Error::io(&steering_dir, e))?;
        println!("Created global steering directory: {}", steering_dir.display());
    }

    if config_path.exists() {
        println!("\nConfig already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())
            .map_err(|e| Error::io(&config_path, e))?;
        println!("Created config.toml at: {}", config_path.display());
        println!("\nNext steps:");
        println!("   1. Add guidance files to {}", steering_dir.display());
        println!("   2. Add project files under .rudder/steering/ in your repository");
        println!("   3. Run: rudder steering list\n");
    }

    println!("Setup complete.\n");

    Ok(())
}
