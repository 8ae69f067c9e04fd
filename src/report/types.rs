use crate::executor::types::NeighborView;
use serde::{Deserialize, Serialize};

/// One output record per squirrel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SquirrelRecord {
    pub id: usize,
    pub nuts: usize,
    pub avg: f64,
    pub left: f64,
    pub right: f64,
}

impl From<&NeighborView> for SquirrelRecord {
    fn from(view: &NeighborView) -> Self {
        Self {
            id: view.worker.0,
            nuts: view.own.nuts,
            avg: view.own.mean,
            left: view.left.mean,
            right: view.right.mean,
        }
    }
}
