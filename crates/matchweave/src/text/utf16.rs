//! # UTF-16 Source View

use crate::types::CodePoint;
use core::ops::Range;

const HIGH_SURROGATE: Range<u16> = 0xD800..0xDC00;
const LOW_SURROGATE: Range<u16> = 0xDC00..0xE000;

/// Is this code unit a high (leading) surrogate?
pub fn is_high_surrogate(unit: u16) -> bool {
    HIGH_SURROGATE.contains(&unit)
}

/// Is this code unit a low (trailing) surrogate?
pub fn is_low_surrogate(unit: u16) -> bool {
    LOW_SURROGATE.contains(&unit)
}

/// The number of UTF-16 units a code point occupies (1 or 2).
pub fn code_point_width(cp: CodePoint) -> usize {
    if cp >= 0x10000 { 2 } else { 1 }
}

/// Encode a string as UTF-16 code units.
pub fn encode_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode UTF-16 code units to a string, replacing lone surrogates.
pub fn units_to_string(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Read the code point starting at `idx`.
///
/// A high surrogate followed by a low surrogate combines into one
/// supplementary-plane code point; a lone surrogate yields its own value.
///
/// ## Returns
/// `None` when `idx` is out of bounds.
pub fn code_point_at(
    units: &[u16],
    idx: usize,
) -> Option<CodePoint> {
    let unit = *units.get(idx)?;
    if is_high_surrogate(unit)
        && let Some(&low) = units.get(idx + 1)
        && is_low_surrogate(low)
    {
        let hi = (unit as CodePoint - 0xD800) << 10;
        let lo = low as CodePoint - 0xDC00;
        return Some(0x10000 + hi + lo);
    }
    Some(unit as CodePoint)
}

/// Read the code point ending at `idx`.
///
/// Walks back up to 2 units: when the preceding unit is a low surrogate
/// with a high surrogate before it, the pair combines.
///
/// ## Returns
/// `None` when `idx == 0` or `idx` is out of bounds.
pub fn code_point_before(
    units: &[u16],
    idx: usize,
) -> Option<CodePoint> {
    if idx == 0 || idx > units.len() {
        return None;
    }
    let unit = units[idx - 1];
    if is_low_surrogate(unit) && idx >= 2 && is_high_surrogate(units[idx - 2]) {
        return code_point_at(units, idx - 2);
    }
    Some(unit as CodePoint)
}

/// An immutable UTF-16 view of a source string.
///
/// All offsets in the crate are UTF-16 unit offsets into one of these.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Utf16Text {
    units: Vec<u16>,
}

impl Utf16Text {
    /// Build a view from a source string.
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        Self {
            units: encode_units(text.as_ref()),
        }
    }

    /// The length in UTF-16 units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Is the view empty?
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The backing code units.
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// A sub-slice of code units; O(1).
    ///
    /// ## Returns
    /// `None` when the range is out of bounds.
    pub fn slice(
        &self,
        range: Range<usize>,
    ) -> Option<&[u16]> {
        self.units.get(range)
    }

    /// The code point starting at `idx`; see [`code_point_at`].
    pub fn code_point_at(
        &self,
        idx: usize,
    ) -> Option<CodePoint> {
        code_point_at(&self.units, idx)
    }

    /// The code point ending at `idx`; see [`code_point_before`].
    pub fn code_point_before(
        &self,
        idx: usize,
    ) -> Option<CodePoint> {
        code_point_before(&self.units, idx)
    }

    /// Does the text at `at` start with the given units?
    pub fn starts_with_at(
        &self,
        at: usize,
        prefix: &[u16],
    ) -> bool {
        match self.slice(at..at + prefix.len()) {
            Some(slice) => slice == prefix,
            None => false,
        }
    }

    /// Decode a sub-range back to a string (lossy for lone surrogates).
    pub fn decode_range(
        &self,
        range: Range<usize>,
    ) -> Option<String> {
        self.slice(range).map(units_to_string)
    }
}

impl From<&str> for Utf16Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl core::fmt::Display for Utf16Text {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        write!(f, "{}", units_to_string(&self.units))
    }
}
