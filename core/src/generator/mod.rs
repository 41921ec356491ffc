use crate::*;
pub use random::*;

mod random;

/// Builds a board for a configuration. `GameConfig` fields are public, so implementations check
/// the configuration again and fail with [`GameError::InvalidConfiguration`].
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}
