use crate::config::{Config, ConfigPatch, EmbedDirective};
use crate::error::{Result, WidgetError};
use crate::host::HostPage;
use crate::prefs::PreferenceStore;
use crate::widget::WidgetRuntime;

/// Mount the widget on a document and return its lifecycle handle
///
/// This is the bootstrap entry point: embedding drivers call it when the
/// script loads, or manually when auto-init was suppressed. At most one
/// widget may be mounted per document; a second attempt is a reported no-op
/// that returns `None`.
pub fn init<H: HostPage, P: PreferenceStore>(
    mut host: H,
    prefs: P,
    directive: &EmbedDirective,
) -> Result<Option<WidgetHandle<H, P>>> {
    if host.is_mounted() {
        log::warn!("widget already mounted on this document; ignoring init");
        return Ok(None);
    }

    host.mount()?;
    let config = Config::resolve(directive);
    let runtime = WidgetRuntime::new(host, prefs, config);

    Ok(Some(WidgetHandle { runtime: Some(runtime) }))
}

/// Singleton lifecycle handle exposed to the hosting page
///
/// Models the page-global widget object: `update` patches the configuration,
/// `remove` unmounts and releases the subtree. Using the handle after
/// `remove` is a host integration bug and fails loudly.
pub struct WidgetHandle<H: HostPage, P: PreferenceStore> {
    runtime: Option<WidgetRuntime<H, P>>,
}

impl<H: HostPage, P: PreferenceStore> WidgetHandle<H, P> {
    /// Merge the given fields into the current config and re-render
    pub fn update(&mut self, patch: &ConfigPatch) -> Result<()> {
        self.live()?.update_config(patch);
        Ok(())
    }

    /// Unmount the widget and release its subtree
    ///
    /// All document listeners are detached before the subtree goes away.
    pub fn remove(&mut self) -> Result<()> {
        self.live()?;
        if let Some(mut runtime) = self.runtime.take() {
            runtime.teardown();
        }
        Ok(())
    }

    /// Whether `remove` has already run
    pub fn is_removed(&self) -> bool {
        self.runtime.is_none()
    }

    /// Access the live runtime to deliver interaction events
    pub fn runtime_mut(&mut self) -> Result<&mut WidgetRuntime<H, P>> {
        self.live()
    }

    /// Access the live runtime read-only
    pub fn runtime(&self) -> Result<&WidgetRuntime<H, P>> {
        match &self.runtime {
            Some(runtime) => Ok(runtime),
            None => Err(removed()),
        }
    }

    fn live(&mut self) -> Result<&mut WidgetRuntime<H, P>> {
        match &mut self.runtime {
            Some(runtime) => Ok(runtime),
            None => Err(removed()),
        }
    }
}

fn removed() -> WidgetError {
    let err = WidgetError::AlreadyRemoved;
    log::error!("{}", err);
    err
}
