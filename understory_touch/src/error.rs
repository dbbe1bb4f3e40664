// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons a batch aborts the active touch sequence.

/// Unrecoverable conditions for the batch being routed.
///
/// The router never surfaces these as failures: the batch reports
/// [`DispatchOutcome::NotHandled`](crate::types::DispatchOutcome::NotHandled), all gesture
/// state is cleared, and the reason is attached to
/// [`BatchResult::aborted`](crate::types::BatchResult::aborted) for diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RouteError {
    /// The sequence document's view was torn down.
    SequenceViewGone,
    /// The sequence document itself no longer exists.
    SequenceDocumentGone,
}

impl core::fmt::Display for RouteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SequenceViewGone => f.write_str("touch sequence document has no view"),
            Self::SequenceDocumentGone => f.write_str("touch sequence document was removed"),
        }
    }
}

impl core::error::Error for RouteError {}
