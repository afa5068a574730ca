//! Ordering key for loosely formatted version strings.
//!
//! A version string is split on `.`, each component is broken into maximal
//! runs of digits and of alphabetic characters, and every run becomes one
//! [`KeyUnit`]. Digit runs are read as base-10 integers; alphabetic runs are
//! folded left to right as `value * 255 + code`. Keys compare unit by unit,
//! and a key that is a strict prefix of another sorts first.
//!
//! Nothing here assumes semantic versioning, so dates (`2019.06`), release
//! candidates (`1.0rc1`) and build tags all produce a key.

use std::cmp::Ordering;
use std::fmt;

const FOLD_BASE: u32 = 255;
const DECIMAL_BASE: u32 = 10;

/// One comparable unit of a [`VersionKey`].
///
/// A non-negative integer of unbounded size, stored as little-endian
/// base-2^32 limbs with no trailing zero limbs. Long digit runs and long
/// alphabetic folds never overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyUnit {
    limbs: Vec<u32>,
}

impl KeyUnit {
    /// Unit for a run of ASCII digits. Leading zeros are ignored, as are
    /// any non-digit characters.
    pub fn from_digits(digits: &str) -> Self {
        let mut unit = Self::default();
        for digit in digits.chars().filter_map(|c| c.to_digit(DECIMAL_BASE)) {
            unit.mul_add(DECIMAL_BASE, digit);
        }
        unit
    }

    /// Unit for a run of alphabetic characters, folded as `value * 255 + code`.
    pub fn from_letters(letters: &str) -> Self {
        let mut unit = Self::default();
        for c in letters.chars() {
            unit.mul_add(FOLD_BASE, u32::from(c));
        }
        unit
    }

    /// The unit's value, if it fits in a `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.as_slice() {
            [] => Some(0),
            [lo] => Some(u64::from(*lo)),
            [lo, hi] => Some((u64::from(*hi) << 32) | u64::from(*lo)),
            _ => None,
        }
    }

    fn mul_add(&mut self, mul: u32, add: u32) {
        let mut carry = u64::from(add);
        for limb in &mut self.limbs {
            let value = u64::from(*limb) * u64::from(mul) + carry;
            *limb = value as u32;
            carry = value >> 32;
        }
        if carry != 0 {
            self.limbs.push(carry as u32);
        }
    }
}

impl From<u64> for KeyUnit {
    fn from(value: u64) -> Self {
        let mut limbs = vec![value as u32, (value >> 32) as u32];
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        Self { limbs }
    }
}

impl Ord for KeyUnit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for KeyUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u64() {
            Some(value) => write!(f, "{}", value),
            None => {
                write!(f, "0x")?;
                for (i, limb) in self.limbs.iter().rev().enumerate() {
                    if i == 0 {
                        write!(f, "{:x}", limb)?;
                    } else {
                        write!(f, "{:08x}", limb)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Totally ordered key derived from a version string.
///
/// Recomputed on demand; it carries no identity beyond the string it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    units: Vec<KeyUnit>,
}

impl VersionKey {
    /// Derive the key for `version`. Every string yields a key, possibly empty.
    pub fn new(version: &str) -> Self {
        let units = version
            .split('.')
            .flat_map(tokenize)
            .map(|token| match TokenKind::of(token) {
                Some(TokenKind::Digits) => KeyUnit::from_digits(token),
                _ => KeyUnit::from_letters(token),
            })
            .collect();
        Self { units }
    }

    pub fn units(&self) -> &[KeyUnit] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl From<&str> for VersionKey {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", unit)?;
        }
        write!(f, ")")
    }
}

/// Compare two version strings by their [`VersionKey`]s.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::new(a).cmp(&VersionKey::new(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Digits,
    Letters,
}

impl TokenKind {
    /// `'A'..='z'` also covers `[ \ ] ^ _` and the backtick, which therefore
    /// count as letters.
    fn classify(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digits),
            'A'..='z' => Some(Self::Letters),
            _ => None,
        }
    }

    fn of(token: &str) -> Option<Self> {
        token.chars().next().and_then(Self::classify)
    }
}

/// Split `component` into maximal digit and letter runs, left to right.
///
/// Characters outside both classes separate runs and are dropped:
/// `"3a10"` gives `["3", "a", "10"]`, `"1-rc2"` gives `["1", "rc", "2"]`.
pub fn tokenize(component: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run: Option<(usize, TokenKind)> = None;

    for (idx, c) in component.char_indices() {
        let kind = TokenKind::classify(c);
        match (run, kind) {
            (Some((_, current)), Some(next)) if current == next => {}
            (Some((start, _)), _) => {
                tokens.push(&component[start..idx]);
                run = kind.map(|k| (idx, k));
            }
            (None, _) => {
                run = kind.map(|k| (idx, k));
            }
        }
    }

    if let Some((start, _)) = run {
        tokens.push(&component[start..]);
    }

    tokens
}
