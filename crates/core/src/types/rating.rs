//! Product rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum RatingError {
    /// The value exceeds the five-star scale.
    #[error("rating must be at most {max} tenths")]
    OutOfRange {
        /// Maximum allowed tenths.
        max: u8,
    },
}

/// A star rating on a five-star scale, stored as tenths.
///
/// Storing tenths as an integer keeps the type `Eq`/`Hash` and avoids
/// floating-point drift in the catalog data.
///
/// ## Examples
///
/// ```
/// use boutique_core::Rating;
///
/// let rating = Rating::from_tenths(48)?;
/// assert_eq!(rating.to_string(), "4.8");
/// assert!(Rating::from_tenths(51).is_err());
/// # Ok::<(), boutique_core::RatingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Maximum rating in tenths (five stars).
    pub const MAX_TENTHS: u8 = 50;

    /// Construct a `Rating` from tenths of a star.
    ///
    /// # Errors
    ///
    /// Returns an error if `tenths` exceeds [`Self::MAX_TENTHS`].
    pub const fn from_tenths(tenths: u8) -> Result<Self, RatingError> {
        if tenths > Self::MAX_TENTHS {
            return Err(RatingError::OutOfRange {
                max: Self::MAX_TENTHS,
            });
        }
        Ok(Self(tenths))
    }

    /// The rating in tenths of a star.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tenths_valid() {
        assert!(Rating::from_tenths(0).is_ok());
        assert!(Rating::from_tenths(48).is_ok());
        assert!(Rating::from_tenths(50).is_ok());
    }

    #[test]
    fn test_from_tenths_out_of_range() {
        assert!(matches!(
            Rating::from_tenths(51),
            Err(RatingError::OutOfRange { max: 50 })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::from_tenths(48).unwrap().to_string(), "4.8");
        assert_eq!(Rating::from_tenths(50).unwrap().to_string(), "5.0");
        assert_eq!(Rating::from_tenths(7).unwrap().to_string(), "0.7");
    }

    #[test]
    fn test_ordering() {
        let low = Rating::from_tenths(43).unwrap();
        let high = Rating::from_tenths(48).unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_serde_is_transparent() {
        let rating = Rating::from_tenths(45).unwrap();
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "45");
    }
}
