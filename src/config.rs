//! Session and animation settings.

use std::time::Duration;

use crate::{DEFAULT_COLS, DEFAULT_ROWS};

/// Animation pace presets offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Fast,
    #[default]
    Average,
    Slow,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Fast, Speed::Average, Speed::Slow];

    /// Delay between two visible expansion steps.
    pub fn delay(self) -> Duration {
        Duration::from_millis(match self {
            Speed::Fast => 10,
            Speed::Average => 50,
            Speed::Slow => 150,
        })
    }
}

/// Settings used to build a [SearchSession](crate::session::SearchSession).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub speed: Speed,
    /// Seed for the per-run colour generator. `None` seeds from system entropy.
    pub color_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            speed: Speed::default(),
            color_seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }
}
