//! Terminal Dashboard Module
//!
//! - **`pane`** - `LogPane`, the bounded log buffer fed as a write sink
//! - **`live`** - `LiveDashboard`, frame rendering and the redraw loop
//!
//! The pane never subscribes to the hub. It is registered as a second
//! destination of the tracing fan-out writer, next to the hub sink.

pub mod live;
pub mod pane;

pub use live::{DashboardInfo, LiveDashboard};
pub use pane::{LogPane, PaneEntry};
