use crate::error::OptimizeError;
use crate::geo::Coordinate;

/// Default number of stops one vehicle handles.
pub const DEFAULT_CAPACITY: usize = 20;

/// Delivery points assigned to one vehicle, in input order.
pub type Partition = Vec<Coordinate>;

/// Splits `points` into contiguous chunks of `capacity`, preserving order.
///
/// Every chunk but the last has exactly `capacity` points. Empty input gives
/// no partitions.
pub fn partition(points: &[Coordinate], capacity: usize) -> Result<Vec<Partition>, OptimizeError> {
    if capacity == 0 {
        return Err(OptimizeError::invalid_input("capacity must be at least 1"));
    }
    validate_points(points)?;

    Ok(points.chunks(capacity).map(<[Coordinate]>::to_vec).collect())
}

pub(crate) fn validate_points(points: &[Coordinate]) -> Result<(), OptimizeError> {
    for (index, point) in points.iter().enumerate() {
        point
            .validate()
            .map_err(|reason| OptimizeError::invalid_input(format!("point {index}: {reason}")))?;
    }
    Ok(())
}
