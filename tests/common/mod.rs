//! Common test utilities for wrfjson.
//!
//! This module provides shared utilities for the integration tests.

pub mod assertions;
pub mod test_data;
