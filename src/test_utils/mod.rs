//! the test_utils folder here will share fixtures between the unit tests of
//! each module
mod common;

pub use common::*;
