// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input vocabulary: pointer buttons and keys.

bitflags::bitflags! {
    /// Pointer buttons held during a move.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// Primary (usually left) button.
        const PRIMARY   = 0b0000_0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0000_0010;
        /// Auxiliary (usually middle) button.
        const AUXILIARY = 0b0000_0100;
    }
}

/// Keys the gesture machine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The forward-delete key.
    Delete,
    /// Anything else, by key code.
    Other(u32),
}

impl Key {
    /// Key code of forward-delete in DOM `keyCode` numbering.
    pub const DELETE_CODE: u32 = 46;

    /// Decode a DOM-style `keyCode`.
    pub fn from_code(code: u32) -> Self {
        match code {
            Self::DELETE_CODE => Self::Delete,
            other => Self::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_code_decodes() {
        assert_eq!(Key::from_code(46), Key::Delete);
        assert_eq!(Key::from_code(8), Key::Other(8));
    }

    #[test]
    fn buttons_from_dom_mask() {
        let held = Buttons::from_bits_truncate(0b101);
        assert!(held.contains(Buttons::PRIMARY));
        assert!(!held.contains(Buttons::SECONDARY));
    }
}
