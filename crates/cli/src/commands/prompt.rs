//! `rudder prompt` — Print the merged instruction chain.

use super::context::{Overrides, RunContext};

pub async fn run(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RunContext::load(overrides)?;
    let outcome = ctx.steering();
    let chain = outcome.instruction_chain(&ctx.instruction_blocks());

    if chain.text.is_empty() {
        tracing::info!("Instruction chain is empty");
        return Ok(());
    }
    println!("{}", chain.text);
    Ok(())
}
