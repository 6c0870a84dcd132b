use crate::catalog::ServiceCatalog;
use crate::config::{Config, ConfigPatch};
use crate::error::Result;
use crate::host::{HostPage, ListenerSet};
use crate::prefs::{PreferenceStore, SERVICE_PREF_KEY};
use crate::selection;
use crate::template::{self, Bindings};
use crate::widget::WidgetState;
use std::time::Duration;

/// Delay between an end-of-selection input event and the capture attempt
///
/// Selection finalization can lag the raw pointer/touch event on some
/// platforms; the delay is bounded and the callback is validated against a
/// generation counter, so a stale firing never mutates state.
pub const CAPTURE_DELAY: Duration = Duration::from_millis(10);

/// Fixed prefix placed before the quoted selection in the composed prompt
pub const SELECTION_PREFIX: &str = "Here is the text I selected:";

/// The widget's interaction state machine
///
/// Composes the selection capture rules, the template engine, the service
/// catalog, and the preference store behind the transition methods below.
/// Every transition re-renders through the host seam and reconciles the
/// document-level listener set with the new state.
pub struct WidgetRuntime<H: HostPage, P: PreferenceStore> {
    host: H,
    prefs: P,
    config: Config,
    catalog: ServiceCatalog,
    state: WidgetState,
    listeners: ListenerSet,
    capture_generation: u64,
}

impl<H: HostPage, P: PreferenceStore> WidgetRuntime<H, P> {
    /// Create a runtime in the collapsed state and render it
    ///
    /// The selected service is seeded from the preference store; an unknown
    /// persisted id falls back to the configured default, then to the first
    /// catalog entry.
    pub fn new(host: H, prefs: P, config: Config) -> Self {
        let catalog = ServiceCatalog::builtin();
        let seeded = seed_service(&prefs, &config, &catalog);

        let mut runtime = Self {
            host,
            prefs,
            config,
            catalog,
            state: WidgetState::collapsed(seeded),
            listeners: ListenerSet::none(),
            capture_generation: 0,
        };
        runtime.after_transition();
        runtime
    }

    /// Current interaction state
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The host seam
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Expand the collapsed control; focuses the question input
    pub fn activate(&mut self) {
        if self.state.open {
            return;
        }
        self.state.open = true;
        self.state.pinned = false;
        self.state.quote_mode = false;
        self.host.focus_question_input();
        self.after_transition();
    }

    /// Collapse the panel; always clears `pinned`
    pub fn minimize(&mut self) {
        if !self.state.open {
            return;
        }
        self.state.open = false;
        self.state.pinned = false;
        self.after_transition();
    }

    /// Update the question input text
    ///
    /// A non-empty question pins the panel open so an accidental outside
    /// click or Escape cannot discard typed input.
    pub fn set_question(&mut self, text: &str) {
        if !self.state.open {
            return;
        }
        self.state.question = text.to_string();
        if !text.trim().is_empty() {
            self.state.pinned = true;
        }
        self.after_transition();
    }

    /// Pointer-down whose propagation path was checked against the widget
    /// subtree by the driver
    ///
    /// An inside event (a selection-menu popover rendered into the same
    /// isolated subtree counts as inside) never dismisses; an outside event
    /// dismisses only an unpinned, non-quote-mode panel.
    pub fn outside_pointer_down(&mut self, path_includes_widget: bool) {
        if path_includes_widget {
            return;
        }
        self.try_dismiss();
    }

    /// Escape key pressed on the document
    pub fn escape_pressed(&mut self) {
        self.try_dismiss();
    }

    fn try_dismiss(&mut self) {
        if !self.state.open || self.state.pinned || self.state.quote_mode {
            return;
        }
        self.state.open = false;
        self.after_transition();
    }

    /// Toggle quote mode
    ///
    /// Turning it on immediately attempts a one-shot capture of a selection
    /// that already exists on the page.
    pub fn toggle_quote(&mut self) {
        if !self.state.open {
            return;
        }
        if self.state.quote_mode {
            self.state.quote_mode = false;
        } else {
            self.capture_now();
            self.state.quote_mode = true;
        }
        self.after_transition();
    }

    /// End-of-selection input event (pointer-up or touch-end) on the host
    /// document while quote mode is active
    ///
    /// Events whose propagation path includes the widget subtree are
    /// ignored. Otherwise a capture is scheduled after [`CAPTURE_DELAY`],
    /// keyed by a fresh generation.
    pub fn selection_ended(&mut self, path_includes_widget: bool) {
        if !self.state.quote_mode || path_includes_widget {
            return;
        }
        self.capture_generation += 1;
        self.host.schedule_capture(CAPTURE_DELAY, self.capture_generation);
    }

    /// Delayed capture callback delivered by the driver
    ///
    /// Discards stale firings: a generation mismatch, or quote mode having
    /// been left since scheduling, must not resurrect a discarded selection.
    pub fn capture_fired(&mut self, generation: u64) {
        if generation != self.capture_generation {
            log::debug!("discarding stale capture callback (generation {})", generation);
            return;
        }
        if !self.state.quote_mode {
            log::debug!("discarding capture callback; quote mode is off");
            return;
        }
        if self.capture_now() {
            self.after_transition();
        }
    }

    /// Read the platform selection and keep it when the capture rules pass.
    /// Returns whether a new selection was stored; an empty or widget-local
    /// selection leaves any previously captured text untouched.
    fn capture_now(&mut self) -> bool {
        let Some(raw) = self.host.selection() else {
            return false;
        };
        match selection::capture(&raw) {
            Some(context) => {
                self.state.selection = Some(context);
                true
            }
            None => false,
        }
    }

    /// Drop the captured selection and leave quote mode
    pub fn clear_selection(&mut self) {
        self.state.selection = None;
        self.state.quote_mode = false;
        self.after_transition();
    }

    /// Switch the destination service; persisted best-effort, open state
    /// unchanged
    pub fn select_service(&mut self, id: &str) {
        self.state.selected_service = id.to_string();
        self.prefs.set(SERVICE_PREF_KEY, id);
        self.after_transition();
    }

    /// Submit the current question
    ///
    /// No-op on an empty or whitespace question, and on an unknown service
    /// id (stale persisted preference). On success the question, selection,
    /// and quote mode are reset; a pinned panel stays open.
    pub fn submit(&mut self) -> Result<()> {
        let question = self.state.question.trim().to_string();
        if question.is_empty() {
            return Ok(());
        }

        let url_prefix = match self.catalog.get(&self.state.selected_service) {
            Some(entry) => entry.url_prefix.clone(),
            None => {
                log::debug!(
                    "unknown service id '{}'; ignoring submit",
                    self.state.selected_service
                );
                return Ok(());
            }
        };

        let bindings = Bindings {
            webpage_url: self.host.location(),
            question,
            text_selection_context: match &self.state.selection {
                Some(context) => format!("{} \"{}\"", SELECTION_PREFIX, context.text),
                None => String::new(),
            },
        };
        let prompt = template::render(&self.config.prompt_template, &bindings);
        let url = format!("{}{}", url_prefix, urlencoding::encode(&prompt));

        self.host.open_url(&url)?;

        self.state.question.clear();
        self.state.selection = None;
        self.state.quote_mode = false;
        if !self.state.pinned {
            self.state.open = false;
        }
        self.after_transition();
        Ok(())
    }

    /// Merge a config patch and re-render (host `update` API)
    pub(crate) fn update_config(&mut self, patch: &ConfigPatch) {
        self.config = self.config.merged(patch);
        self.after_transition();
    }

    /// Detach all listeners and release the host subtree (host `remove` API)
    pub(crate) fn teardown(&mut self) {
        if self.listeners != ListenerSet::none() {
            self.listeners = ListenerSet::none();
            self.host.sync_listeners(self.listeners);
        }
        self.host.unmount();
    }

    /// Reconcile listeners with the new state and re-render
    fn after_transition(&mut self) {
        debug_assert!(self.state.is_consistent(), "pinned widget must be open");

        let wanted = self.state.wanted_listeners();
        if wanted != self.listeners {
            self.listeners = wanted;
            self.host.sync_listeners(wanted);
        }
        self.host.render(&self.state, &self.config);
    }
}

/// Pick the initial service id: valid persisted preference, else valid
/// configured default, else the first catalog entry
fn seed_service<P: PreferenceStore>(prefs: &P, config: &Config, catalog: &ServiceCatalog) -> String {
    if let Some(persisted) = prefs.get(SERVICE_PREF_KEY) {
        if catalog.contains(&persisted) {
            return persisted;
        }
        log::debug!("persisted service id '{}' not in catalog; falling back", persisted);
    }

    if catalog.contains(&config.default_service) {
        return config.default_service.clone();
    }
    log::debug!(
        "configured default service '{}' not in catalog; using first entry",
        config.default_service
    );
    catalog.first_id().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use crate::prefs::MemoryPrefs;

    fn runtime() -> WidgetRuntime<NullHost, MemoryPrefs> {
        WidgetRuntime::new(NullHost::new(), MemoryPrefs::new(), Config::default())
    }

    #[test]
    fn test_initial_state_collapsed() {
        let rt = runtime();
        assert!(!rt.state().open);
        assert_eq!(rt.state().selected_service, "chatgpt");
    }

    #[test]
    fn test_seed_from_persisted_preference() {
        let mut prefs = MemoryPrefs::new();
        prefs.set(SERVICE_PREF_KEY, "perplexity");

        let rt = WidgetRuntime::new(NullHost::new(), prefs, Config::default());
        assert_eq!(rt.state().selected_service, "perplexity");
    }

    #[test]
    fn test_seed_falls_back_on_stale_preference() {
        let mut prefs = MemoryPrefs::new();
        prefs.set(SERVICE_PREF_KEY, "gemini");

        let rt = WidgetRuntime::new(NullHost::new(), prefs, Config::default());
        assert_eq!(rt.state().selected_service, "chatgpt");
    }

    #[test]
    fn test_seed_falls_back_to_first_entry_on_bad_default() {
        let config = Config {
            default_service: "not-a-service".to_string(),
            ..Config::default()
        };

        let rt = WidgetRuntime::new(NullHost::new(), MemoryPrefs::new(), config);
        assert_eq!(rt.state().selected_service, "chatgpt");
    }

    #[test]
    fn test_activate_resets_sub_flags() {
        let mut rt = runtime();
        rt.activate();

        assert!(rt.state().open);
        assert!(!rt.state().pinned);
        assert!(!rt.state().quote_mode);
    }

    #[test]
    fn test_typing_pins() {
        let mut rt = runtime();
        rt.activate();

        rt.set_question("   ");
        assert!(!rt.state().pinned);

        rt.set_question("why is the sky blue");
        assert!(rt.state().pinned);
    }

    #[test]
    fn test_minimize_clears_pinned() {
        let mut rt = runtime();
        rt.activate();
        rt.set_question("why");
        assert!(rt.state().pinned);

        rt.minimize();
        assert!(!rt.state().open);
        assert!(!rt.state().pinned);
        assert!(rt.state().is_consistent());
    }

    #[test]
    fn test_outside_click_dismisses_unpinned() {
        let mut rt = runtime();
        rt.activate();

        rt.outside_pointer_down(false);
        assert!(!rt.state().open);
    }

    #[test]
    fn test_inside_click_never_dismisses() {
        let mut rt = runtime();
        rt.activate();

        rt.outside_pointer_down(true);
        assert!(rt.state().open);
    }

    #[test]
    fn test_pinned_suppresses_dismissal() {
        let mut rt = runtime();
        rt.activate();
        rt.set_question("why");

        let before = rt.state().clone();
        rt.outside_pointer_down(false);
        rt.escape_pressed();
        assert_eq!(rt.state(), &before);
    }

    #[test]
    fn test_quote_mode_suppresses_dismissal() {
        let mut rt = runtime();
        rt.activate();
        rt.toggle_quote();
        assert!(rt.state().quote_mode);

        rt.escape_pressed();
        assert!(rt.state().open);
    }

    #[test]
    fn test_select_service_persists() {
        let mut rt = runtime();
        rt.activate();
        rt.select_service("claude");

        assert_eq!(rt.state().selected_service, "claude");
        assert!(rt.state().open, "service change must not collapse the panel");
        assert_eq!(rt.prefs.get(SERVICE_PREF_KEY), Some("claude".to_string()));
    }

    #[test]
    fn test_submit_empty_question_is_noop() {
        let mut rt = runtime();
        rt.activate();
        rt.set_question("   ");

        rt.submit().unwrap();
        assert!(rt.state().open, "rejected submit must not change state");
    }

    #[test]
    fn test_stale_generation_discarded() {
        let mut rt = runtime();
        rt.activate();
        rt.toggle_quote();
        rt.selection_ended(false);
        rt.selection_ended(false);

        // Only the latest generation may apply.
        rt.capture_fired(1);
        rt.capture_fired(99);
        assert!(rt.state().selection.is_none());
    }

    #[test]
    fn test_capture_after_quote_mode_left_discarded() {
        let mut rt = runtime();
        rt.activate();
        rt.toggle_quote();
        rt.selection_ended(false);
        rt.toggle_quote(); // leave quote mode before the callback fires

        rt.capture_fired(1);
        assert!(rt.state().selection.is_none());
    }

    #[test]
    fn test_clear_selection_leaves_quote_mode() {
        let mut rt = runtime();
        rt.activate();
        rt.toggle_quote();

        rt.clear_selection();
        assert!(rt.state().selection.is_none());
        assert!(!rt.state().quote_mode);
    }

    #[test]
    fn test_selection_ended_ignored_outside_quote_mode() {
        let mut rt = runtime();
        rt.activate();

        rt.selection_ended(false);
        assert_eq!(rt.capture_generation, 0);
    }
}
