use crate::error::{OctreeError, OctreeResult};

#[derive(Debug, Clone)]
pub struct Config {
    /// Spare cells provisioned besides the root.
    pub pool_size: usize,
    /// A leaf splits once its pending bucket reaches this size.
    pub split_threshold: u32,
    /// Children collapse into their parent when they hold fewer objects than this.
    pub merge_threshold: u32,
    /// Leaves at this depth never split. `None` leaves depth unbounded.
    pub max_depth: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pool_size: 4000,
            split_threshold: 8,
            merge_threshold: 4,
            max_depth: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> OctreeResult<()> {
        if self.split_threshold == 0 || self.merge_threshold > self.split_threshold {
            return Err(OctreeError::InvalidThresholds {
                split_threshold: self.split_threshold,
                merge_threshold: self.merge_threshold,
            });
        }
        if self.pool_size >= u32::MAX as usize {
            return Err(OctreeError::PoolTooLarge {
                pool_size: self.pool_size,
            });
        }
        Ok(())
    }
}
