//! Precedence merging of steering content with the external instruction blocks.
//!
//! The order is fixed: leading block, steering content, trailing block. The
//! trailing (most specific) block always comes last so it has final say.

use serde::{Deserialize, Serialize};

/// Separates the blocks of the final instruction chain.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// The three blocks of the final instruction chain and their merged text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionChain {
    pub leading: String,
    pub steering: String,
    pub trailing: String,
    /// Non-empty blocks in order, separated by a blank line.
    pub text: String,
}

/// Place `composed` strictly between `leading` and `trailing`.
///
/// Empty blocks contribute nothing, so merging with an empty steering
/// document is the same as merging the two external blocks alone.
pub fn merge(
    leading: impl Into<String>,
    composed: impl Into<String>,
    trailing: impl Into<String>,
) -> InstructionChain {
    let leading = leading.into();
    let steering = composed.into();
    let trailing = trailing.into();

    let text = [leading.as_str(), steering.as_str(), trailing.as_str()]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    InstructionChain {
        leading,
        steering,
        trailing,
        text,
    }
}
