// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scene operations.

use crate::keys::DrawableKey;

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or updating a scene.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sampling or mesh generation rejected its input.
    #[error("geometry error: {0}")]
    Geometry(#[from] fngraph_geometry::Error),

    /// The handle was never issued or was already released.
    #[error("unknown drawable handle: {0:?}")]
    UnknownHandle(DrawableKey),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be read or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
