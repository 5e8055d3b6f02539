//! Simulator configuration.

use std::time::Duration;

/// Tunables for [`Simulator`](crate::Simulator).
///
/// # Examples
///
/// ```
/// use edu6502::SimulatorConfig;
///
/// let config = SimulatorConfig {
///     random_seed: Some(7),
///     ..SimulatorConfig::default()
/// };
/// assert_eq!(config.batch_size, 97);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Instructions executed per [`tick`](crate::Simulator::tick).
    pub batch_size: usize,

    /// How often the host is expected to call `tick` while running.
    pub tick_interval: Duration,

    /// Seed for the `$FE` random cell. `None` seeds from the system clock.
    pub random_seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            batch_size: 97,
            tick_interval: Duration::from_millis(15),
            random_seed: None,
        }
    }
}
