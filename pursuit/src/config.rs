//! Simulation settings.

/// Tunable parameters for a [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Maze width in cells.
    pub width: i32,
    /// Maze height in cells.
    pub height: i32,
    /// Ticks per ghost step; a ghost acts on every `move_interval`-th tick.
    pub move_interval: u32,
    /// Movement steps to skip re-searching after a search found no path,
    /// while the target stays put. 0 re-searches on every step.
    pub replan_cooldown: u32,
    /// Maze seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            move_interval: 3,
            replan_cooldown: 0,
            seed: None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{"width": 32, "seed": 9}"#).unwrap();
        assert_eq!(cfg.width, 32);
        assert_eq!(cfg.height, 20);
        assert_eq!(cfg.move_interval, 3);
        assert_eq!(cfg.seed, Some(9));
    }
}
