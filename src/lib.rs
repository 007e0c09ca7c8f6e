//! # mdoc-validate
//!
//! Semantic validation and normalization for mdoc manual page trees.
//!
//! An upstream parser (or the [`DocumentBuilder`](mdoc::building::DocumentBuilder)
//! shipped here) calls the validator once when a node is opened and once when it
//! is completed. The validator checks structure, fills in normalized data,
//! rewrites the tree where the input is sloppy and records document metadata.
//!
//! ## Testing
//!
//! Fixture helpers for building small documents live in the
//! [testing module](mdoc::testing).

pub mod mdoc;
