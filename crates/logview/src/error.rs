//! Error types

use thiserror::Error;

/// Errors a [`Host`](crate::Host) reports when asked for its panel.
///
/// Both leave the [`LogView`](crate::LogView) constructed but inert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// The host has nothing the panel could be attached to.
    #[error("no attachment point for the console panel")]
    MissingHost,

    /// The host already handed its panel to another view.
    #[error("console panel is already mounted")]
    AlreadyMounted,
}
