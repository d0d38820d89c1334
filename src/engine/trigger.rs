//! Trigger scanning (input pre-classification).
//!
//! This module inspects the raw input string once and produces coarse signals
//! that let the locator skip work that cannot succeed:
//!
//! - no ASCII digit at all means no group can exist;
//! - a delimiter that never occurs in the input cannot join fields, so its
//!   shape regexes are never run.
//!
//! False positives are fine (the locator still has to match a full shape);
//! false negatives are not.

use crate::Delimiter;

bitflags::bitflags! {
    /// Coarse features of an input string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SignalMask: u8 {
        const HAS_DIGITS = 1 << 0;
        const HYPHEN     = 1 << 1;
        const UNDERSCORE = 1 << 2;
        const SLASH      = 1 << 3;
        const BACKSLASH  = 1 << 4;
        const PERIOD     = 1 << 5;
    }
}

impl SignalMask {
    pub fn for_delimiter(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Hyphen => SignalMask::HYPHEN,
            Delimiter::Underscore => SignalMask::UNDERSCORE,
            Delimiter::Slash => SignalMask::SLASH,
            Delimiter::Backslash => SignalMask::BACKSLASH,
            Delimiter::Period => SignalMask::PERIOD,
        }
    }
}

/// Input characteristics detected from the raw input.
#[derive(Debug, Clone, Copy)]
pub struct InputSignals {
    pub mask: SignalMask,
}

impl InputSignals {
    /// Scan `input` for digits and delimiter characters.
    pub fn scan(input: &str) -> Self {
        let mut mask = SignalMask::empty();
        for b in input.bytes() {
            mask |= match b {
                b'0'..=b'9' => SignalMask::HAS_DIGITS,
                b'-' => SignalMask::HYPHEN,
                b'_' => SignalMask::UNDERSCORE,
                b'/' => SignalMask::SLASH,
                b'\\' => SignalMask::BACKSLASH,
                b'.' => SignalMask::PERIOD,
                _ => continue,
            };
        }
        Self { mask }
    }

    pub fn has_digits(&self) -> bool {
        self.mask.contains(SignalMask::HAS_DIGITS)
    }

    pub fn contains_delimiter(&self, delimiter: Delimiter) -> bool {
        self.mask.contains(SignalMask::for_delimiter(delimiter))
    }
}
