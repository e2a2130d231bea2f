use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(2900);
const DEEP_MAX_DEPTH: u8 = 8;
const COMPACT_MAX_DEPTH: u8 = 3;
const COMPACT_FAN_OUT: usize = 6;

/// Headroom kept below a peer-imposed turn timeout.
pub const TIMEOUT_MARGIN: Duration = Duration::from_millis(100);

/// Named search presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Unrestricted fan-out, deepening up to depth 8.
    #[default]
    Deep,
    /// Depth 3 with only the six best-looking moves explored per node.
    ///
    /// The cap applies at every ply, not only at the root, so this preset
    /// prunes harder than a root-only top-six search at the same depth.
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u8,
    #[serde(rename = "time_budget_ms", with = "duration_ms")]
    pub time_budget: Duration,
    /// Forward-pruning cap on moves explored per node. `None` explores all.
    pub fan_out_cap: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::deep()
    }
}

impl SearchConfig {
    pub fn deep() -> Self {
        Self {
            max_depth: DEEP_MAX_DEPTH,
            time_budget: DEFAULT_TIME_BUDGET,
            fan_out_cap: None,
        }
    }

    pub fn compact() -> Self {
        Self {
            max_depth: COMPACT_MAX_DEPTH,
            time_budget: DEFAULT_TIME_BUDGET,
            fan_out_cap: Some(COMPACT_FAN_OUT),
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Deep => Self::deep(),
            Profile::Compact => Self::compact(),
        }
    }

    /// Missing keys fall back to the deep preset.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json_str)?;
        Ok(config.normalized())
    }

    /// Depth below 1 would never complete an iteration, so it is raised to 1.
    pub fn normalized(self) -> Self {
        Self {
            max_depth: self.max_depth.max(1),
            fan_out_cap: self.fan_out_cap.filter(|&cap| cap > 0),
            ..self
        }
    }

    /// Clamps the budget so the answer is ready before `timeout` expires.
    pub fn within(self, timeout: Duration) -> Self {
        Self {
            time_budget: self
                .time_budget
                .min(timeout.saturating_sub(TIMEOUT_MARGIN)),
            ..self
        }
    }

    pub fn with_time_budget(self, time_budget: Duration) -> Self {
        Self { time_budget, ..self }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
