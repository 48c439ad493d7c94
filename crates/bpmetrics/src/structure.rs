//! Derived graph views over the element relation.
//!
//! The relation stores adjacency only as per-element `outgoing` lists. The
//! views in this module resolve those lists into graphs on demand, one
//! diagram at a time. They borrow the relation and are never persisted.

mod adjacency;

pub use adjacency::DiagramGraph;
