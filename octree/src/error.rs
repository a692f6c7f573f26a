use common::shapes::Point3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OctreeError {
    OutOfCapacity { needed: usize, available: usize },
    InvalidAabb { min: Point3, max: Point3 },
    InvalidBounds { min: Point3, max: Point3 },
    InvalidThresholds {
        split_threshold: u32,
        merge_threshold: u32,
    },
    PoolTooLarge { pool_size: usize },
}

pub type OctreeResult<T> = Result<T, OctreeError>;

impl fmt::Display for OctreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OctreeError::OutOfCapacity { needed, available } => {
                write!(
                    f,
                    "cell pool exhausted (needed: {}, available: {})",
                    needed, available
                )
            }
            OctreeError::InvalidAabb { min, max } => {
                write!(
                    f,
                    "object bounds must be finite with min <= max (min: {:?}, max: {:?})",
                    min, max
                )
            }
            OctreeError::InvalidBounds { min, max } => {
                write!(
                    f,
                    "octree bounds must be finite with min <= max (min: {:?}, max: {:?})",
                    min, max
                )
            }
            OctreeError::InvalidThresholds {
                split_threshold,
                merge_threshold,
            } => {
                write!(
                    f,
                    "split threshold must be non-zero and not below the merge threshold (split_threshold: {}, merge_threshold: {})",
                    split_threshold, merge_threshold
                )
            }
            OctreeError::PoolTooLarge { pool_size } => {
                write!(
                    f,
                    "pool size must fit in 32-bit cell ids (pool_size: {})",
                    pool_size
                )
            }
        }
    }
}

impl std::error::Error for OctreeError {}
