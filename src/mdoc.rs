//! Main module for mdoc validation functionality

pub mod ast;
pub mod building;
pub mod config;
pub mod date;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod lookup;
pub mod meta;
#[doc(hidden)]
pub mod testing;
pub mod validate;
