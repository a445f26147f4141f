//! Defines the temporal track graph and its frame metadata.
pub mod edge;
pub mod error;
pub mod import;
pub mod metadata;
pub mod node;
pub mod storage;
pub mod temporal;

// Re-export key types for convenient access
pub use edge::EdgeKey;
pub use error::GraphError;
pub use import::{EdgeRecord, GraphData, NodeRecord};
pub use metadata::FrameIndex;
pub use node::{Attributes, Frame, NodeId};
pub use temporal::TemporalGraph;
