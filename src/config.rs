use std::env;
use std::time::Duration;

use tracing::warn;

use crate::clock::MAX_SPEED;
use crate::clock::MIN_SPEED;
use crate::error::Result;
use crate::resize::Viewport;
use crate::rules::RuleSet;

/// Fewest rows allowed when sizing the grid by hand.
pub const MIN_ROWS: usize = 10;

/// Most rows allowed when sizing the grid by hand.
pub const MAX_ROWS: usize = 50;

pub const ROWS_VAR: &str = "DIGIT_LIFE_ROWS";
pub const SPEED_VAR: &str = "DIGIT_LIFE_SPEED_MS";
pub const RULE_VAR: &str = "DIGIT_LIFE_RULE";

/// Startup settings of a [`Session`](crate::session::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub speed: Duration,
    pub rule: RuleSet,
    pub viewport: Viewport,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 30,
            speed: Duration::from_millis(500),
            rule: RuleSet::default(),
            viewport: Viewport::new(800, 600),
        }
    }
}

impl Settings {
    /// Defaults, overridden by `DIGIT_LIFE_ROWS`, `DIGIT_LIFE_SPEED_MS` and `DIGIT_LIFE_RULE`
    /// when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Settings::from_env`], reading variables through `lookup`.
    ///
    /// Numbers that fail to parse are ignored with a warning. Numbers out of range are clamped.
    /// A bad rule string is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(rows) = parse_number(ROWS_VAR, lookup(ROWS_VAR)) {
            settings.rows = clamp_rows(rows as usize);
        }

        if let Some(ms) = parse_number(SPEED_VAR, lookup(SPEED_VAR)) {
            settings.speed = Duration::from_millis(ms).clamp(MIN_SPEED, MAX_SPEED);
        }

        if let Some(rule) = lookup(RULE_VAR) {
            settings.rule = rule.parse()?;
        }

        Ok(settings)
    }
}

pub fn clamp_rows(rows: usize) -> usize {
    rows.clamp(MIN_ROWS, MAX_ROWS)
}

fn parse_number(key: &str, value: Option<String>) -> Option<u64> {
    let value = value?;

    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(key, value = %value, error = %e, "ignoring setting");
            None
        }
    }
}
