// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the editor.

use understory_forest::LoadError;

/// Errors from loading trees or options.
///
/// Gestures never fail: rejected or meaningless gestures are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The tree was well-formed JSON but not loadable.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The tree document could not be parsed.
    #[error("invalid tree document: {0}")]
    Json(#[source] serde_json::Error),
    /// The options document could not be parsed.
    #[error("invalid editor options: {0}")]
    Options(#[source] serde_json::Error),
}
