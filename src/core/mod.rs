//! Core account construction module
//!
//! This module contains the components that turn accumulated input into a
//! validated account:
//! - `builder` - Two-group attribute accumulator and the `validate` entry point
//! - `validation` - Stateless country and generic rule passes

pub mod builder;
pub mod validation;

pub use builder::{AccountBuilder, EssentialAttributes, OptionalAttributes, OptionalSetters};
pub use validation::{ValidatedKeys, ValidationEngine};
