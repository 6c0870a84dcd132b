use thiserror::Error;

/// Errors produced by the widget runtime and the bundling pipeline
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The widget handle was used after `remove()` — a host integration bug
    #[error("widget has already been removed; update/remove after remove is a lifecycle bug")]
    AlreadyRemoved,

    /// Mounting the isolated subtree on the host page failed
    ///
    /// Returned by [`HostPage::mount`](crate::host::HostPage::mount)
    /// implementations; `widget::init` propagates it unchanged.
    #[error("failed to mount widget: {0}")]
    MountFailed(String),

    /// Opening the destination URL in a new browsing context failed
    ///
    /// Returned by [`HostPage::open_url`](crate::host::HostPage::open_url)
    /// implementations (a blocked popup, typically); `submit` propagates it
    /// without consuming the typed question.
    #[error("failed to open destination URL: {0}")]
    OpenFailed(String),

    /// A bundle source asset could not be read
    #[error("failed to read asset '{path}': {reason}")]
    AssetRead { path: String, reason: String },

    /// A bundle artifact could not be written
    #[error("failed to write artifact '{path}': {reason}")]
    ArtifactWrite { path: String, reason: String },

    /// The requested bundle version is not valid semver
    #[error("invalid bundle version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, WidgetError>;
