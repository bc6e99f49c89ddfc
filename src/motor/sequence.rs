//! Full-step coil sequencing for a 2-phase bipolar stepper.

/// Direction of travel along the screw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward larger positions.
    #[default]
    Forward,
    /// Toward smaller positions.
    Backward,
}

impl Direction {
    /// Direction needed to get from `current` to `target`.
    #[inline]
    pub fn toward(current: i32, target: i32) -> Self {
        if target > current {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Position delta of one step in this direction.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Index into the four-state full-step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase(u8);

impl Phase {
    /// Number of phases in one electrical cycle.
    pub const COUNT: u8 = 4;

    /// Create a phase, wrapping the index into `0..4`.
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index % Self::COUNT)
    }

    /// Raw index in `0..4`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Neighbouring phase one step in `direction`.
    #[inline]
    pub const fn advance(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self((self.0 + 1) % Self::COUNT),
            Direction::Backward => Self((self.0 + Self::COUNT - 1) % Self::COUNT),
        }
    }
}

/// Logic levels of the four H-bridge inputs.
///
/// Bit 3..0 map to AIN1, AIN2, BIN1, BIN2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern(u8);

impl CoilPattern {
    /// All inputs low: both bridges coast, no holding torque.
    pub const OFF: Self = Self(0b0000);

    /// Build from a 4-bit value, ignoring higher bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Raw 4-bit value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// AIN1 level.
    #[inline]
    pub const fn ain1(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// AIN2 level.
    #[inline]
    pub const fn ain2(self) -> bool {
        self.0 & 0b0100 != 0
    }

    /// BIN1 level.
    #[inline]
    pub const fn bin1(self) -> bool {
        self.0 & 0b0010 != 0
    }

    /// BIN2 level.
    #[inline]
    pub const fn bin2(self) -> bool {
        self.0 & 0b0001 != 0
    }

    /// Levels in pin order AIN1, AIN2, BIN1, BIN2.
    #[inline]
    pub const fn levels(self) -> [bool; 4] {
        [self.ain1(), self.ain2(), self.bin1(), self.bin2()]
    }

    /// Whether any coil is driven.
    #[inline]
    pub const fn is_energized(self) -> bool {
        self.0 != 0
    }
}

/// Phase-to-pattern lookup for two-coils-on full stepping.
pub struct StepSequencer;

impl StepSequencer {
    const TABLE: [CoilPattern; 4] = [
        CoilPattern(0b1010),
        CoilPattern(0b0110),
        CoilPattern(0b0101),
        CoilPattern(0b1001),
    ];

    /// Coil pattern for `phase`.
    #[inline]
    pub const fn pattern(phase: Phase) -> CoilPattern {
        Self::TABLE[phase.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_cycle() {
        let mut phase = Phase::default();
        let mut seen = [0u8; 8];
        for slot in seen.iter_mut() {
            phase = phase.advance(Direction::Forward);
            *slot = phase.index();
        }
        assert_eq!(seen, [1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_backward_cycle() {
        let mut phase = Phase::default();
        let mut seen = [0u8; 4];
        for slot in seen.iter_mut() {
            phase = phase.advance(Direction::Backward);
            *slot = phase.index();
        }
        assert_eq!(seen, [3, 2, 1, 0]);
    }

    #[test]
    fn test_table_matches_wiring() {
        assert_eq!(StepSequencer::pattern(Phase::new(0)).levels(), [true, false, true, false]);
        assert_eq!(StepSequencer::pattern(Phase::new(1)).levels(), [false, true, true, false]);
        assert_eq!(StepSequencer::pattern(Phase::new(2)).levels(), [false, true, false, true]);
        assert_eq!(StepSequencer::pattern(Phase::new(3)).levels(), [true, false, false, true]);
    }

    #[test]
    fn test_adjacent_patterns_flip_one_coil() {
        for i in 0..4 {
            let a = StepSequencer::pattern(Phase::new(i));
            let b = StepSequencer::pattern(Phase::new(i).advance(Direction::Forward));
            // One bridge reverses polarity per full step: two input bits change.
            assert_eq!((a.bits() ^ b.bits()).count_ones(), 2);
            assert!(a.is_energized());
        }
    }

    #[test]
    fn test_direction_toward() {
        assert_eq!(Direction::toward(0, 10), Direction::Forward);
        assert_eq!(Direction::toward(10, 0), Direction::Backward);
        assert_eq!(Direction::Backward.sign(), -1);
    }
}
