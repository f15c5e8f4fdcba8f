//! Run configuration.
//!
//! A `PortConfig` is built once by the application (CLI flags, a JSON file,
//! or a test) and handed to the simulator builder.  The simulator never
//! mutates it afterwards.

use std::fmt;
use std::str::FromStr;

use crate::{PortError, PortResult, SimTime};

// ── DispatchPolicy ────────────────────────────────────────────────────────────

/// Which side a freed tug serves when both have unmet demand.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DispatchPolicy {
    /// Serve the entrance queue before wharf pickups.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "default"))]
    EntranceFirst,

    /// Serve wharf pickups before the entrance queue.  Lowers the risk of
    /// every berth filling with tankers that cannot leave.
    #[cfg_attr(feature = "serde", serde(alias = "safe"))]
    WharfFirst,
}

impl FromStr for DispatchPolicy {
    type Err = PortError;

    fn from_str(s: &str) -> PortResult<Self> {
        match s {
            "default" | "entrance-first" => Ok(DispatchPolicy::EntranceFirst),
            "safe" | "wharf-first" => Ok(DispatchPolicy::WharfFirst),
            other => Err(PortError::Config(format!("unknown dispatch policy '{other}'"))),
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DispatchPolicy::EntranceFirst => "entrance-first",
            DispatchPolicy::WharfFirst => "wharf-first",
        })
    }
}

// ── TugTravel ─────────────────────────────────────────────────────────────────

/// Normal-distribution parameters for tug trips, in minutes.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TugTravel {
    /// Mean duration of a trip without a tanker in tow.
    pub mu_empty:  f64,
    pub sig_empty: f64,
    /// Mean duration of a trip towing a tanker.
    pub mu_full:   f64,
    pub sig_full:  f64,
}

impl Default for TugTravel {
    fn default() -> Self {
        Self {
            mu_empty:  2.0,
            sig_empty: 1.0,
            mu_full:   10.0,
            sig_full:  3.0,
        }
    }
}

impl TugTravel {
    pub fn validate(&self) -> PortResult<()> {
        for (name, mu) in [("mu_empty", self.mu_empty), ("mu_full", self.mu_full)] {
            if !mu.is_finite() || mu < 0.0 {
                return Err(PortError::Config(format!("{name} must be finite and >= 0, got {mu}")));
            }
        }
        for (name, sig) in [("sig_empty", self.sig_empty), ("sig_full", self.sig_full)] {
            if !sig.is_finite() || sig <= 0.0 {
                return Err(PortError::Config(format!("{name} must be finite and > 0, got {sig}")));
            }
        }
        Ok(())
    }
}

// ── PortConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PortConfig {
    /// Berths, shared by unloading tankers and tankers waiting to be towed out.
    pub max_wharves: usize,

    /// Size of the tug pool.
    pub max_tugs: usize,

    /// The run stops before dispatching any event at or after this time.
    pub horizon: SimTime,

    pub travel: TugTravel,

    pub policy: DispatchPolicy,

    /// RNG seed.  `None` seeds from OS entropy (non-reproducible run).
    pub seed: Option<u64>,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            max_wharves: 20,
            max_tugs:    10,
            horizon:     SimTime::one_week(),
            travel:      TugTravel::default(),
            policy:      DispatchPolicy::default(),
            seed:        None,
        }
    }
}

impl PortConfig {
    /// Reject configurations the simulator must not start with.
    pub fn validate(&self) -> PortResult<()> {
        self.validate_with(false)
    }

    /// Like [`validate`](Self::validate), but `allow_empty_pools` lets
    /// `max_wharves` and `max_tugs` be zero (a port with every berth or tug
    /// out of service).
    pub fn validate_with(&self, allow_empty_pools: bool) -> PortResult<()> {
        if !allow_empty_pools {
            if self.max_wharves == 0 {
                return Err(PortError::Config("max_wharves must be at least 1".into()));
            }
            if self.max_tugs == 0 {
                return Err(PortError::Config("max_tugs must be at least 1".into()));
            }
        }
        if !self.horizon.is_finite() || self.horizon.minutes() < 0.0 {
            return Err(PortError::Config(format!(
                "horizon must be finite and >= 0, got {}",
                self.horizon.minutes()
            )));
        }
        self.travel.validate()
    }
}
