// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reporting sub-components built without their owning component.

use thiserror::Error;

/// A sub-component was constructed outside the component that provides its context.
///
/// This is a wiring mistake in the calling code, for example an option item
/// created without the listbox it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("[trellis]: `{consumer}` must be used within a `{provider}` component")]
pub struct MissingContextError {
    /// Name of the context accessor that failed.
    pub consumer: &'static str,
    /// Name of the component that provides the context.
    pub provider: &'static str,
}

/// Unwrap an optional context handle, or report which provider is missing.
///
/// ```rust
/// use trellis_selection::require_context;
///
/// let parent: Option<&str> = None;
/// let err = require_context(parent, "useListboxContext", "Listbox").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "[trellis]: `useListboxContext` must be used within a `Listbox` component"
/// );
/// ```
pub fn require_context<T>(
    context: Option<T>,
    consumer: &'static str,
    provider: &'static str,
) -> Result<T, MissingContextError> {
    context.ok_or(MissingContextError { consumer, provider })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn present_context_passes_through() {
        assert_eq!(require_context(Some(3), "useX", "X"), Ok(3));
    }

    #[test]
    fn message_names_both_sides() {
        let err = require_context::<()>(None, "useMenuContext", "Menu").unwrap_err();
        assert_eq!(
            err.to_string(),
            "[trellis]: `useMenuContext` must be used within a `Menu` component"
        );
    }
}
