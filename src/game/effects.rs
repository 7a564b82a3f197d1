//! Power-up catalog
//!
//! Static data only: what each power-up is called, how it is drawn and how
//! long its effect stays active once collected. The engine decides what the
//! effects actually do.

use serde::{Deserialize, Serialize};

/// The kinds of power-up that can appear on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    DoublePoints,
    Invincibility,
    Shrink,
}

/// Display and timing data for one power-up kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    /// Short machine-friendly tag
    pub tag: &'static str,
    /// Text shown while the effect is active
    pub label: &'static str,
    /// Glyph drawn on the board and next to the label
    pub symbol: char,
    /// How long the effect counts as active after pickup
    pub duration_ms: u64,
}

const SPEED_BOOST: EffectSpec = EffectSpec {
    tag: "speed",
    label: "Speed Boost!",
    symbol: '»',
    duration_ms: 5000,
};

const DOUBLE_POINTS: EffectSpec = EffectSpec {
    tag: "points",
    label: "Double Points!",
    symbol: '♦',
    duration_ms: 8000,
};

const INVINCIBILITY: EffectSpec = EffectSpec {
    tag: "invincible",
    label: "Invincible!",
    symbol: '★',
    duration_ms: 6000,
};

// Shrink is applied instantly; its duration only drives the HUD.
const SHRINK: EffectSpec = EffectSpec {
    tag: "shrink",
    label: "Snake Shrinks!",
    symbol: '▼',
    duration_ms: 4000,
};

impl PowerUpKind {
    /// Every kind, in catalog order
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::DoublePoints,
        PowerUpKind::Invincibility,
        PowerUpKind::Shrink,
    ];

    pub fn spec(&self) -> &'static EffectSpec {
        match self {
            PowerUpKind::SpeedBoost => &SPEED_BOOST,
            PowerUpKind::DoublePoints => &DOUBLE_POINTS,
            PowerUpKind::Invincibility => &INVINCIBILITY,
            PowerUpKind::Shrink => &SHRINK,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.spec().duration_ms
    }
}
