//! `rudder status` — Show resolved paths and settings.

use super::context::{Overrides, RunContext};
use rudder_config::AppConfig;

pub async fn run(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RunContext::load(overrides)?;
    let config = &ctx.config;

    println!("Rudder Status");
    println!("=============");
    println!("  Home:          {}", ctx.home.display());
    println!("  Project root:  {}", ctx.repo_root.display());
    println!("  Global dir:    {}", ctx.roots.global_dir.display());
    println!("  Project dir:   {}", ctx.roots.project_dir.display());
    println!(
        "  Steering:      {}",
        if config.steering.enabled { "enabled" } else { "disabled" }
    );
    println!("  Budget:        {} bytes", config.steering.max_bytes);
    println!(
        "  Global block:  {}",
        if config.instructions.load_global { "on" } else { "off" }
    );
    println!(
        "  Project block: {}",
        if config.instructions.load_project { "on" } else { "off" }
    );

    if AppConfig::config_path().exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file, using defaults (run `rudder onboard` to create one)");
    }

    Ok(())
}
