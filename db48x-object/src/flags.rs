//! `Flags`: the user/system flag vector addressed by signed integer
//! (spec.md §3.4).
//!
//! Positive indices are plain user flags with no built-in meaning; negative
//! indices are system flags that mirror a handful of named settings (e.g.
//! `-22` is "return `∞` instead of raising `Numerical overflow`", spec.md
//! §4.3.4). Both halves are backed by fixed-width bitsets the way
//! `fuel_tx`'s `PoliciesBits` packs its policy presence bits, rather than a
//! `Vec<bool>` — flag counts are small and bounded by the hardware word
//! size this is meant to run on.

use strum_macros::EnumIter;

bitflags::bitflags! {
    /// Raw bit storage for the system half of [`Flags`], one bit per
    /// [`SystemFlag`] at the position its magnitude names.
    #[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    struct SystemFlagBits: u64 {
        const SYMBOLIC_CONSTANTS = 1 << 2;
        const SYMBOLIC_RESULTS = 1 << 3;
        const UNDERFLOW_ERROR = 1 << 20;
        const OVERFLOW_ERROR = 1 << 21;
        const INFINITY_VALUE = 1 << 22;
        const POSITIVE_UNDERFLOW_INDICATOR = 1 << 23;
        const NEGATIVE_UNDERFLOW_INDICATOR = 1 << 24;
        const INFINITE_RESULT = 1 << 25;
        const INFINITE_RESULT_NEGATIVE = 1 << 26;
    }
}

/// A system flag: a negative flag index with built-in meaning.
///
/// The discriminant is the flag's magnitude, so `SystemFlag::InfinityValue
/// as i32` is `22` and the flag itself lives at index `-22`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum SystemFlag {
    /// Flag `-2`: constants resolve to a symbolic form rather than a number.
    SymbolicConstants = 2,
    /// Flag `-3`: results stay symbolic rather than being forced numeric.
    SymbolicResults = 3,
    /// Flag `-20`: underflow raises `Numerical ... underflow` instead of
    /// saturating to zero.
    UnderflowError = 20,
    /// Flag `-21`: overflow raises `Numerical overflow` instead of
    /// saturating or yielding `∞`.
    OverflowError = 21,
    /// Flag `-22`: overflow/division-by-zero yields signed `∞` instead of
    /// raising an error, when `OverflowError`/`InfinityError` allow it.
    InfinityValue = 22,
    /// Flag `-23`: set by the kernel after the most recent operation
    /// produced a positive-underflow result.
    PositiveUnderflowIndicator = 23,
    /// Flag `-24`: set by the kernel after the most recent operation
    /// produced a negative-underflow result.
    NegativeUnderflowIndicator = 24,
    /// Flag `-25`: set by the kernel after the most recent operation
    /// yielded `∞` under the `InfinityValue` policy.
    InfiniteResult = 25,
    /// Flag `-26`: reserved companion to `-25` for the opposite pole.
    InfiniteResultNegative = 26,
}

impl SystemFlag {
    const COUNT: usize = 64;

    fn bits(self) -> SystemFlagBits {
        SystemFlagBits::from_bits_truncate(1u64 << (self as u8))
    }

    /// The negative flag index this system flag occupies.
    pub const fn index(self) -> i32 {
        -(self as i32)
    }
}

/// How many positive user-flag slots `Flags` reserves.
pub const USER_FLAG_COUNT: usize = 128;

/// The combined user/system flag vector.
///
/// `index` follows the HP-RPL convention: `1..=USER_FLAG_COUNT` addresses a
/// plain user flag, negative values address a [`SystemFlag`], and `0` is
/// never a valid flag index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    system: SystemFlagBits,
    user: [u64; 2],
}

impl Flags {
    /// An all-clear flag vector.
    pub const fn new() -> Self {
        Flags {
            system: SystemFlagBits::empty(),
            user: [0, 0],
        }
    }

    /// `SF index`: set the flag at `index`.
    pub fn set(&mut self, index: i32) {
        self.write(index, true);
    }

    /// `CF index`: clear the flag at `index`.
    pub fn clear(&mut self, index: i32) {
        self.write(index, false);
    }

    /// `FS? index`: true if the flag at `index` is set.
    pub fn is_set(&self, index: i32) -> bool {
        self.read(index)
    }

    /// `FC? index`: true if the flag at `index` is clear.
    pub fn is_clear(&self, index: i32) -> bool {
        !self.read(index)
    }

    /// `FS?C index`: read the flag, then clear it.
    pub fn test_and_clear_if_set(&mut self, index: i32) -> bool {
        let was_set = self.read(index);
        self.write(index, false);
        was_set
    }

    /// `FC?C index`: read the flag, then clear it.
    pub fn test_and_clear_if_clear(&mut self, index: i32) -> bool {
        let was_clear = !self.read(index);
        self.write(index, false);
        was_clear
    }

    /// Convenience accessor for a [`SystemFlag`] by name.
    pub fn system_flag(&self, flag: SystemFlag) -> bool {
        self.system.contains(flag.bits())
    }

    /// Convenience setter for a [`SystemFlag`] by name.
    pub fn set_system_flag(&mut self, flag: SystemFlag, value: bool) {
        self.system.set(flag.bits(), value);
    }

    fn read(&self, index: i32) -> bool {
        if index < 0 {
            let bit = (-index) as u8;
            if (bit as usize) >= SystemFlag::COUNT {
                return false;
            }
            self.system
                .contains(SystemFlagBits::from_bits_truncate(1u64 << bit))
        } else if index > 0 {
            let slot = (index - 1) as usize;
            let (word, bit) = (slot / 64, slot % 64);
            self.user
                .get(word)
                .map(|w| w & (1u64 << bit) != 0)
                .unwrap_or(false)
        } else {
            false
        }
    }

    fn write(&mut self, index: i32, value: bool) {
        if index < 0 {
            let bit = (-index) as u8;
            if (bit as usize) >= SystemFlag::COUNT {
                return;
            }
            self.system
                .set(SystemFlagBits::from_bits_truncate(1u64 << bit), value);
        } else if index > 0 {
            let slot = (index - 1) as usize;
            let (word, bit) = (slot / 64, slot % 64);
            if let Some(w) = self.user.get_mut(word) {
                if value {
                    *w |= 1u64 << bit;
                } else {
                    *w &= !(1u64 << bit);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_duality() {
        let mut flags = Flags::new();
        for index in [1, 22, 97, -21, -26] {
            flags.set(index);
            flags.clear(index);
            assert!(!flags.is_set(index));
            flags.clear(index);
            flags.set(index);
            assert!(flags.is_set(index));
        }
    }

    #[test]
    fn named_system_flag_matches_its_index() {
        let mut flags = Flags::new();
        flags.set(SystemFlag::InfinityValue.index());
        assert!(flags.system_flag(SystemFlag::InfinityValue));
        assert!(!flags.system_flag(SystemFlag::OverflowError));
    }

    #[test]
    fn user_flags_past_the_first_word_are_independent() {
        let mut flags = Flags::new();
        flags.set(1);
        flags.set(USER_FLAG_COUNT as i32);
        assert!(flags.is_set(1));
        assert!(flags.is_set(USER_FLAG_COUNT as i32));
        flags.clear(1);
        assert!(!flags.is_set(1));
        assert!(flags.is_set(USER_FLAG_COUNT as i32));
    }

    #[test]
    fn zero_index_is_inert() {
        let mut flags = Flags::new();
        flags.set(0);
        assert!(!flags.is_set(0));
    }
}
