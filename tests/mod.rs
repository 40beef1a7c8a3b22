//! Test suite for livetail
//!
//! This module organizes all integration tests. Unit tests live next to the
//! code they cover.

#[cfg(feature = "server")]
pub mod common;
#[cfg(feature = "server")]
pub mod integration;
