//! `rudder steering` — Inspect steering files.

use super::context::{Overrides, RunContext};
use rudder_steering::report;

pub async fn list(overrides: &Overrides, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RunContext::load(overrides)?;
    let outcome = ctx.steering();

    if json {
        println!("{}", report::to_json(&outcome)?);
    } else {
        print!("{}", report::render_listing(&outcome));
    }
    Ok(())
}

pub async fn explain(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RunContext::load(overrides)?;
    let outcome = ctx.steering();

    println!("Project root: {}", ctx.repo_root.display());
    print!("{}", report::render_explanation(&outcome));

    let blocks = ctx.instruction_blocks();
    println!();
    if blocks.is_empty() {
        println!("No instruction blocks loaded.");
    } else {
        print!("{}", blocks.diagnostic_summary());
    }
    Ok(())
}
