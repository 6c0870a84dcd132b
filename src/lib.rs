//! # ask-widget
//!
//! A client-only "ask AI about this page" widget runtime. A page visitor
//! types a question (optionally quoting a text selection from the page) and
//! is redirected to their preferred hosted AI chat service with a composed
//! prompt. There is no server-side component; the only persistent state is
//! one preference in the origin-scoped key-value store.
//!
//! ## Features
//!
//! - **Interaction state machine**: collapse/expand with pin and quote-mode
//!   sub-flags, leak-free document listener lifecycle, pinned panels survive
//!   outside clicks and submits
//! - **Selection capture**: excludes selections anchored in the widget's own
//!   isolated subtree, hard 1024-character cap, debounced capture validated
//!   by a generation counter
//! - **Prompt templating**: single-pass `${placeholder}` substitution over a
//!   fixed placeholder set, injection-safe (no re-expansion)
//! - **Build pipeline**: deterministic, versioned, self-contained script
//!   artifacts with the stylesheet rewritten for isolated-subtree injection
//!
//! ## Mounting the widget
//!
//! The embedding driver implements [`HostPage`] over the real document and
//! hands it to [`widget::init`] together with a preference store and the
//! embedding directive parsed from the script tag:
//!
//! ```rust,no_run
//! use ask_widget::config::EmbedDirective;
//! use ask_widget::host::NullHost;
//! use ask_widget::prefs::MemoryPrefs;
//! use ask_widget::widget;
//!
//! # fn main() -> ask_widget::Result<()> {
//! let directive = EmbedDirective::from_attrs([("data-default-ai", "claude")]);
//! let mut handle = widget::init(NullHost::new(), MemoryPrefs::new(), &directive)?
//!     .expect("no widget mounted yet");
//!
//! // Interaction events are delivered to the runtime:
//! let runtime = handle.runtime_mut()?;
//! runtime.activate();
//! runtime.set_question("What does this page say about pricing?");
//! runtime.submit()?;
//!
//! // The hosting page's lifecycle API:
//! handle.remove()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Building artifacts
//!
//! The `widget-bundle` binary (feature `cli`, on by default) drives
//! [`bundle`]: it reads the asset directory, rewrites `@property` CSS rules
//! for isolated styling scopes, inlines the stylesheet into the script, and
//! writes `v{X.Y.Z}.js`, `v{X.Y.Z}.css`, and the `v{X}.js` alias.
//!
//! ## Module Overview
//!
//! - [`widget`]: the interaction state machine and lifecycle handle
//! - [`selection`]: text-selection capture rules
//! - [`template`]: prompt template interpolation
//! - [`catalog`]: the static destination-service catalog
//! - [`config`]: embedding directive resolution and config patching
//! - [`prefs`]: the preference-store capability interface
//! - [`host`]: the host-page seam the embedding driver implements
//! - [`bundle`]: the versioned artifact pipeline
//! - [`error`]: error types and result alias

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod prefs;
pub mod selection;
pub mod template;
pub mod widget;

pub use catalog::{ServiceCatalog, ServiceEntry};
pub use config::{Config, ConfigPatch, EmbedDirective};
pub use error::{Result, WidgetError};
pub use host::{HostPage, ListenerSet, NullHost};
pub use prefs::{MemoryPrefs, NoopPrefs, PreferenceStore, SERVICE_PREF_KEY};
pub use selection::{RawSelection, SelectionContext};
pub use template::{Bindings, render};
pub use widget::{WidgetHandle, WidgetRuntime, WidgetState, init};
