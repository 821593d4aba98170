use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a cell is alive in the next generation, given its current state and the number
    /// of alive cells around it.
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        if neighbors > 8 {
            return false;
        }

        let mask: u16 = 1 << neighbors;

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8u8)
                .filter(|&n| set & (1u16 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

/// Accepts both `b3s23` and `B3/S23` notations.
impl FromStr for RuleSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Start,
            Birth,
            Survival,
        }

        let invalid = || Error::InvalidRule(s.to_owned());

        let mut state = State::Start;
        let (mut b, mut sv) = (0u16, 0u16);

        for c in s.trim().chars() {
            match (c, &state) {
                ('b' | 'B', State::Start) => state = State::Birth,
                ('/', State::Birth) => {}
                ('s' | 'S', State::Birth) => state = State::Survival,
                (n, State::Birth | State::Survival) => {
                    let n = n.to_digit(10).ok_or_else(invalid)?;

                    if n > 8 {
                        return Err(invalid());
                    }

                    match state {
                        State::Birth => b |= 1 << n,
                        _ => sv |= 1 << n,
                    }
                }
                _ => return Err(invalid()),
            }
        }

        match state {
            State::Survival => Ok(RuleSet::new(b, sv)),
            _ => Err(invalid()),
        }
    }
}
