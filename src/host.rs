//! Host-page seam
//!
//! Everything the widget needs from the embedding document goes through
//! [`HostPage`]: reading the location and selection, opening the destination
//! URL, mounting/unmounting the isolated subtree, scheduling the delayed
//! selection capture, and keeping document-level listeners in sync with the
//! runtime's state. Rendering is opaque to the runtime; the driver draws
//! whatever the current state says.

use crate::config::Config;
use crate::error::Result;
use crate::selection::RawSelection;
use crate::widget::WidgetState;
use std::time::Duration;

/// Document-level listeners the runtime currently needs
///
/// Dismissal listeners (mousedown + keydown) are wanted exactly while the
/// panel is expanded; capture listeners (pointerup + touchend) exactly while
/// quote mode is on. The runtime pushes changes through
/// [`HostPage::sync_listeners`]; anything still attached for a state no
/// longer active is a leak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerSet {
    /// Outside-click and Escape dismissal handling
    pub dismiss: bool,

    /// End-of-selection capture handling
    pub capture: bool,
}

impl ListenerSet {
    /// The empty set (nothing attached)
    pub fn none() -> Self {
        Self::default()
    }
}

/// The widget's boundary with the embedding document
pub trait HostPage {
    /// Current document location (href)
    fn location(&self) -> String;

    /// Open a URL in a new top-level browsing context
    fn open_url(&mut self, url: &str) -> Result<()>;

    /// Read the platform's current selection, if any
    fn selection(&self) -> Option<RawSelection>;

    /// Move keyboard focus to the question input
    fn focus_question_input(&mut self);

    /// Schedule a selection-capture callback after `delay`
    ///
    /// The driver must later deliver `generation` back to
    /// [`WidgetRuntime::capture_fired`](crate::widget::WidgetRuntime::capture_fired);
    /// stale generations are discarded there.
    fn schedule_capture(&mut self, delay: Duration, generation: u64);

    /// Attach/detach document-level listeners to match `wanted`
    fn sync_listeners(&mut self, wanted: ListenerSet);

    /// Redraw the widget for the given state and config
    fn render(&mut self, state: &WidgetState, config: &Config);

    /// Whether a widget subtree is already mounted on this document
    fn is_mounted(&self) -> bool;

    /// Create the isolated subtree and inject the inlined stylesheet
    fn mount(&mut self) -> Result<()>;

    /// Release the widget's subtree
    fn unmount(&mut self);
}

/// Host implementation that does nothing
///
/// Useful for embedders' smoke tests and for exercising the state machine
/// without a document.
#[derive(Debug, Clone, Default)]
pub struct NullHost {
    mounted: bool,
}

impl NullHost {
    /// Create an unmounted NullHost
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostPage for NullHost {
    fn location(&self) -> String {
        "about:blank".to_string()
    }

    fn open_url(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn selection(&self) -> Option<RawSelection> {
        None
    }

    fn focus_question_input(&mut self) {}

    fn schedule_capture(&mut self, _delay: Duration, _generation: u64) {}

    fn sync_listeners(&mut self, _wanted: ListenerSet) {}

    fn render(&mut self, _state: &WidgetState, _config: &Config) {}

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn mount(&mut self) -> Result<()> {
        self.mounted = true;
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_host_mount_cycle() {
        let mut host = NullHost::new();
        assert!(!host.is_mounted());

        host.mount().unwrap();
        assert!(host.is_mounted());

        host.unmount();
        assert!(!host.is_mounted());
    }

    #[test]
    fn test_listener_set_none() {
        let set = ListenerSet::none();
        assert!(!set.dismiss);
        assert!(!set.capture);
    }
}
