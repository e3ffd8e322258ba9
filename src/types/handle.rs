//! Handle type for document objects
//!
//! Handles are unique 64-bit identifiers for every object registered in a
//! document. They are issued from a per-document counter and are
//! conventionally written as upper-case hexadecimal.

use std::fmt;

/// A unique identifier for document objects
///
/// Handle 0 is reserved and means "not registered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The null/invalid handle (0)
    pub const NULL: Handle = Handle(0);

    /// Create a new handle from a u64 value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if this is a null/invalid handle
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is a valid handle
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// Issue a handle from the shared counter.
    ///
    /// Returns the new handle and the value the counter must be advanced to.
    /// A zero counter is bumped to 1 so that the null handle is never issued.
    #[inline]
    pub const fn assign(counter: u64) -> (Handle, u64) {
        let value = if counter == 0 { 1 } else { counter };
        (Handle(value), value + 1)
    }

    /// Hexadecimal representation without prefix, as written in drawing files
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.0)
    }

    /// Parse a hexadecimal handle string (with or without `0x`)
    pub fn from_hex(text: &str) -> Option<Handle> {
        let digits = text
            .trim()
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        if digits.is_empty() {
            return None;
        }
        u64::from_str_radix(digits, 16).ok().map(Handle)
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NULL
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl fmt::LowerHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        let null = Handle::NULL;
        assert!(null.is_null());
        assert!(!null.is_valid());
        assert_eq!(null.value(), 0);
    }

    #[test]
    fn test_assign_threads_counter() {
        let (first, next) = Handle::assign(0x10);
        assert_eq!(first, Handle::new(0x10));
        assert_eq!(next, 0x11);

        let (second, next) = Handle::assign(next);
        assert_eq!(second, Handle::new(0x11));
        assert_eq!(next, 0x12);
        assert!(first < second);
    }

    #[test]
    fn test_assign_never_issues_null() {
        let (handle, next) = Handle::assign(0);
        assert_eq!(handle, Handle::new(1));
        assert_eq!(next, 2);
    }

    #[test]
    fn test_handle_display() {
        let handle = Handle::new(0xABCD);
        assert_eq!(format!("{}", handle), "0xABCD");
        assert_eq!(format!("{:x}", handle), "abcd");
        assert_eq!(handle.to_hex(), "ABCD");
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Handle::from_hex("1F"), Some(Handle::new(0x1F)));
        assert_eq!(Handle::from_hex("0x2a"), Some(Handle::new(0x2A)));
        assert_eq!(Handle::from_hex(""), None);
        assert_eq!(Handle::from_hex("zz"), None);
    }

    #[test]
    fn test_handle_conversion() {
        let value: u64 = 12345;
        let handle: Handle = value.into();
        let back: u64 = handle.into();
        assert_eq!(value, back);
    }
}
