//! bpmetrics Core Types and Definitions
//!
//! This crate provides the foundational types shared by the parser and the
//! metrics engine. It includes:
//!
//! - **Shapes**: The raw nested shape tree of one exported diagram ([`shape`] module)
//! - **Elements**: Flat element records and the model identifier ([`element`] module)
//! - **Relations**: The element relation, the contract between parsing and
//!   measurement ([`relation`] module)
//! - **Metadata**: Per-diagram metadata joined by model id ([`metadata`] module)
//! - **Categories**: Static stencil category tables ([`category`] module)

pub mod category;
pub mod element;
pub mod metadata;
pub mod relation;
pub mod shape;
