//! Errors from checked spatial queries.

use thiserror::Error;

use super::bounds::Region;

/// A spatial query was malformed.
///
/// The unchecked query methods treat these inputs as programming errors
/// (`debug_assert!`) and return empty results in release builds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialQueryError {
    /// Region has NaN edges or min > max
    #[error("invalid query region [{}, {}] - [{}, {}]", .0.min_x, .0.min_y, .0.max_x, .0.max_y)]
    InvalidRegion(Region),

    /// Query point is NaN or infinite
    #[error("invalid query coordinate ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    /// Search radius is negative or NaN
    #[error("invalid search radius {0}")]
    InvalidRadius(f64),
}

impl SpatialQueryError {
    pub(crate) fn check_region(region: &Region) -> Result<(), Self> {
        if region.is_valid() {
            Ok(())
        } else {
            Err(Self::InvalidRegion(*region))
        }
    }

    pub(crate) fn check_point(x: f64, y: f64, radius: f64) -> Result<(), Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Self::InvalidCoordinate { x, y });
        }
        // +inf is an unbounded search
        if radius.is_nan() || radius < 0.0 {
            return Err(Self::InvalidRadius(radius));
        }
        Ok(())
    }
}
