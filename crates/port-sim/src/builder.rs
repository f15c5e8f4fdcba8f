//! Fluent builder for constructing a [`PortSim`].

use port_core::{PortConfig, PortError, SimRng, SimTime, StochasticVariates, VariateSource};
use port_events::EventQueue;
use port_fleet::TankerStore;

use crate::{PortSim, PortState, PortStats, SimError, SimResult};

/// Fluent builder for [`PortSim<V>`].
///
/// # Required inputs
///
/// - [`PortConfig`]: capacities, horizon, travel parameters, policy, seed
/// - `V: VariateSource`: where durations come from
///   ([`StochasticVariates`] for real runs, `FixedVariates` for tests)
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                                   |
/// |---------------------------|-------------------------------------------|
/// | `.first_arrival_at(t)`    | drawn as an inter-arrival gap from t = 0  |
/// | `.allow_empty_pools(b)`   | `false`: zero wharves/tugs rejected       |
/// | `.audit(b)`               | `false`: no per-event invariant audit     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = PortSimBuilder::stochastic(config)?
///     .audit(true)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct PortSimBuilder<V: VariateSource> {
    config:            PortConfig,
    variates:          V,
    first_arrival:     Option<SimTime>,
    allow_empty_pools: bool,
    audit:             bool,
}

impl PortSimBuilder<StochasticVariates> {
    /// Builder using `rand_distr` draws seeded from `config.seed` (or OS
    /// entropy when unset).
    pub fn stochastic(config: PortConfig) -> SimResult<Self> {
        config.travel.validate()?;
        let variates = StochasticVariates::new(&config.travel, SimRng::from_seed(config.seed))?;
        Ok(Self::new(config, variates))
    }
}

impl<V: VariateSource> PortSimBuilder<V> {
    /// Create a builder with all required inputs.
    pub fn new(config: PortConfig, variates: V) -> Self {
        Self {
            config,
            variates,
            first_arrival:     None,
            allow_empty_pools: false,
            audit:             false,
        }
    }

    /// Schedule the first tanker at exactly `at` instead of drawing it.
    pub fn first_arrival_at(mut self, at: SimTime) -> Self {
        self.first_arrival = Some(at);
        self
    }

    /// Accept `max_wharves == 0` or `max_tugs == 0`.
    pub fn allow_empty_pools(mut self, allow: bool) -> Self {
        self.allow_empty_pools = allow;
        self
    }

    /// Check every invariant after each event and fail the run on the first
    /// violation.
    pub fn audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// Validate the configuration and return a simulator with the first
    /// arrival already scheduled.
    pub fn build(mut self) -> SimResult<PortSim<V>> {
        self.config.validate_with(self.allow_empty_pools)?;

        let first = match self.first_arrival {
            Some(t) => t,
            None => SimTime::ZERO.after(self.variates.inter_arrival(SimTime::ZERO).max(0.0)),
        };
        if !first.is_finite() || first < SimTime::ZERO {
            return Err(SimError::Config(PortError::Config(format!(
                "first arrival must be finite and >= 0, got {}",
                first.minutes()
            ))));
        }

        let mut sim = PortSim {
            state:       PortState::new(self.config.max_wharves, self.config.max_tugs),
            queue:       EventQueue::new(),
            fleet:       TankerStore::new(),
            stats:       PortStats::default(),
            variates:    self.variates,
            config:      self.config,
            audit:       self.audit,
            was_blocked: false,
            finished:    false,
        };
        sim.generate_tanker(first)?;
        Ok(sim)
    }
}
