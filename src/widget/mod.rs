//! Widget runtime module
//!
//! The interaction state machine and its lifecycle surface:
//! - WidgetState: collapse/expand state with pin and quote sub-flags
//! - WidgetRuntime: transition methods, listener reconciliation, submit
//! - WidgetHandle / init: the page-global handle with update/remove

pub mod handle;
pub mod runtime;
pub mod state;

pub use handle::{WidgetHandle, init};
pub use runtime::{CAPTURE_DELAY, SELECTION_PREFIX, WidgetRuntime};
pub use state::WidgetState;
