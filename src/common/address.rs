// src/common/address.rs

use super::error::TdrError;
use core::convert::TryFrom;
use core::fmt;

/// Single-character address of one probe on the shared bus.
///
/// Valid addresses are the printable alphanumerics `0`-`9`, `A`-`Z` and
/// `a`-`z`. The query character `?` is also representable and doubles as
/// the "address not yet discovered" sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeAddress(char);

impl ProbeAddress {
    pub const QUERY: ProbeAddress = ProbeAddress('?');

    /// Creates a new `ProbeAddress` if the given character is a valid address.
    /// Returns `Result<Self, TdrError<()>>` because validation itself cannot
    /// cause an I/O error.
    pub fn new(address_char: char) -> Result<Self, TdrError<()>> {
        if Self::is_valid_address_char(address_char) || address_char == '?' {
            Ok(ProbeAddress(address_char))
        } else {
            Err(TdrError::InvalidAddress(address_char))
        }
    }

    #[inline]
    pub const fn as_char(&self) -> char {
        self.0
    }

    #[inline]
    pub const fn is_query(&self) -> bool {
        self.0 == '?'
    }

    #[inline]
    pub const fn is_valid_address_char(c: char) -> bool {
        matches!(c, '0'..='9' | 'a'..='z' | 'A'..='Z')
    }
}

impl Default for ProbeAddress {
    /// A freshly constructed session has no discovered address yet.
    fn default() -> Self {
        Self::QUERY
    }
}

impl TryFrom<char> for ProbeAddress {
    type Error = TdrError<()>;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProbeAddress> for char {
    fn from(value: ProbeAddress) -> Self {
        value.0
    }
}

impl fmt::Display for ProbeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(ProbeAddress::new('0').is_ok());
        assert!(ProbeAddress::new('5').is_ok());
        assert!(ProbeAddress::new('9').is_ok());
        assert!(ProbeAddress::new('a').is_ok());
        assert!(ProbeAddress::new('z').is_ok());
        assert!(ProbeAddress::new('A').is_ok());
        assert!(ProbeAddress::new('Z').is_ok());
        assert!(ProbeAddress::new('?').is_ok());
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(matches!(
            ProbeAddress::new(' '),
            Err(TdrError::InvalidAddress(' '))
        ));
        assert!(matches!(
            ProbeAddress::new('$'),
            Err(TdrError::InvalidAddress('$'))
        ));
        assert!(matches!(
            ProbeAddress::new('\n'),
            Err(TdrError::InvalidAddress('\n'))
        ));
        assert!(matches!(
            ProbeAddress::new('é'),
            Err(TdrError::InvalidAddress('é'))
        ));
    }

    #[test]
    fn test_default_is_query() {
        let addr = ProbeAddress::default();
        assert!(addr.is_query());
        assert_eq!(addr, ProbeAddress::QUERY);
    }

    #[test]
    fn test_try_from_char() {
        assert_eq!(ProbeAddress::try_from('1').unwrap(), ProbeAddress('1'));
        assert_eq!(ProbeAddress::try_from('b').unwrap(), ProbeAddress('b'));
        assert_eq!(ProbeAddress::try_from('C').unwrap(), ProbeAddress('C'));
        assert_eq!(ProbeAddress::try_from('?').unwrap(), ProbeAddress('?'));
        assert!(matches!(
            ProbeAddress::try_from('*'),
            Err(TdrError::InvalidAddress('*'))
        ));
    }

    #[test]
    fn test_display_and_as_char() {
        let addr = ProbeAddress::new('3').unwrap();
        assert_eq!(addr.as_char(), '3');
        assert_eq!(addr.to_string(), "3");
        assert_eq!(char::from(addr), '3');
    }
}
