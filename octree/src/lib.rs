pub mod error;
pub mod octree;
pub mod scene;

pub use common::shapes;
pub use error::{OctreeError, OctreeResult};
pub use octree::{
    AuditError, AuditReport, Bucket, Cell, CellId, CellLink, CellState, Config,
    MaintenanceStats, Octant, Octree,
};
pub use scene::{ObjectId, ObjectLinks, ObjectStore, Owner, Scene, Slot};
