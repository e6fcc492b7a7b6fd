// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Key;

/// Errors raised while turning nodes into a collection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Two nodes resolved to the same key.
    #[error("duplicate collection key `{key}`")]
    DuplicateKey {
        /// The repeated key.
        key: Key,
    },
}
