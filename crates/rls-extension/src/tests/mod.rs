//! Crate-level unit and BDD tests driven through in-memory host doubles.

mod support;
