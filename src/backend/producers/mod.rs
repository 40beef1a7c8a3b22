//! Producer Adapters
//!
//! Everything that turns an event into a line and hands it to the hub.
//!
//! - **`writer`** - `HubWriter` (`io::Write` into the hub) and `FanoutWriter`
//!   (one write, many destinations; used as the tracing writer)
//! - **`generator`** - Runtime-toggleable demo log generator
//! - **`reporter`** - Infrastructure event reporter
//!
//! Producers make no assumption about the number of subscribers; publishing
//! into an empty hub is a no-op.

pub mod generator;
pub mod reporter;
pub mod writer;

pub use generator::{DemoGenerator, Toggle};
pub use reporter::InfraReporter;
pub use writer::{FanoutWriter, HubWriter};
