// SPDX-FileCopyrightText: 2026 Lorekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model routing for the Lorekeep pipeline.
//!
//! Selects a provider per [`TaskType`](lorekeep_core::TaskType) and degrades
//! gracefully when one (or both) of the configured providers is missing or
//! failing.

pub mod router;

pub use router::ModelRouter;
