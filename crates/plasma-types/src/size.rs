use serde::{Deserialize, Serialize};

/// Optional total byte count declared when a channel is opened.
///
/// The store requires an object's exact size before any bytes are written,
/// so a known `ExpectedSize` lets direct mode allocate up front and accept
/// multiple writes. Declared values ≤ 0 are normalized to unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpectedSize(Option<u64>);

impl ExpectedSize {
    /// Size not known in advance.
    pub const fn unknown() -> Self {
        Self(None)
    }

    /// A known total size in bytes.
    pub const fn bytes(n: u64) -> Self {
        Self(Some(n))
    }

    /// Normalize a caller-declared size: values ≤ 0 mean unknown.
    pub fn from_declared(declared: i64) -> Self {
        if declared > 0 {
            Self(Some(declared as u64))
        } else {
            Self(None)
        }
    }

    /// The declared size, if known.
    pub fn get(&self) -> Option<u64> {
        self.0
    }

    /// Returns `true` if a size was declared.
    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }
}

impl From<Option<u64>> for ExpectedSize {
    fn from(size: Option<u64>) -> Self {
        Self(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_positive_is_known() {
        let size = ExpectedSize::from_declared(4096);
        assert!(size.is_known());
        assert_eq!(size.get(), Some(4096));
    }

    #[test]
    fn declared_zero_and_negative_are_unknown() {
        assert_eq!(ExpectedSize::from_declared(0), ExpectedSize::unknown());
        assert_eq!(ExpectedSize::from_declared(-1), ExpectedSize::unknown());
    }

    #[test]
    fn default_is_unknown() {
        assert!(!ExpectedSize::default().is_known());
    }

    #[test]
    fn bytes_constructor() {
        assert_eq!(ExpectedSize::bytes(10).get(), Some(10));
    }
}
