#![warn(missing_docs)]
//! Fold Core - Headless Region-Folding Engine
//!
//! # Overview
//!
//! `fold-core` keeps a mutable text buffer and a set of foldable regions
//! consistent with each other. It scans the buffer for occurrences of a
//! recognizable pattern, replaces each occurrence's displayed form with a
//! shorter placeholder, and keeps placeholder and full-text forms in sync as
//! the buffer is edited and as the cursor moves in and out of folded spans.
//! It does not render anything, assuming the host provides the editing
//! surface (buffer + cursor) and a presentation layer for placeholder
//! overlays.
//!
//! # Core Features
//!
//! - **Pluggable Matching**: the fold pattern is a [`RegionMatcher`] trait,
//!   not a built-in grammar
//! - **Offset Reconciliation**: collapsed regions shorten the buffer;
//!   every region's current offset is derived from the states upstream of it
//! - **Edit Reconciliation**: external edits rebuild the region set from the
//!   canonical (fully expanded) text, preserving the region the user is
//!   typing in
//! - **Cursor-Driven Folding**: explicit cursor movement into a placeholder
//!   expands it; movement out of an expanded region collapses it again
//! - **Reentrancy Guard**: programmatic buffer mutations are suppressed from
//!   re-triggering the handlers that caused them
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  FoldSession (reconciliation + cursor sync) │  ← Entry points
//! ├─────────────────────────────────────────────┤
//! │  RegionSet (registry + offset reconciler)   │  ← Derived state
//! ├─────────────────────────────────────────────┤
//! │  RegionMatcher (pluggable pattern)          │  ← Match layer
//! ├─────────────────────────────────────────────┤
//! │  EditSurface (host buffer + cursor)         │  ← External surface
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fold_core::matcher::{RawMatch, RegionMatcher};
//! use fold_core::{EditSurface, FoldSession, MemorySurface};
//!
//! /// Folds the literal marker `TODO!` down to `TODO`.
//! struct TodoMatcher;
//!
//! impl RegionMatcher for TodoMatcher {
//!     fn matches(&self, canonical_text: &str) -> Vec<RawMatch> {
//!         canonical_text
//!             .match_indices("TODO!")
//!             .map(|(byte, needle)| {
//!                 RawMatch::new(canonical_text[..byte].chars().count(), needle)
//!             })
//!             .collect()
//!     }
//!
//!     fn display_text(&self, _full_text: &str) -> String {
//!         "TODO".to_string()
//!     }
//! }
//!
//! let mut surface = MemorySurface::new("keep TODO! tail");
//! let mut session = FoldSession::new(Box::new(TodoMatcher));
//! session.attach(&mut surface).unwrap();
//! assert_eq!(surface.text(), "keep TODO tail");
//!
//! // An explicit cursor move into the placeholder expands it again.
//! session.on_cursor_moved(&mut surface, 6, true).unwrap();
//! assert_eq!(surface.text(), "keep TODO! tail");
//! ```
//!
//! Regex-based matchers (including the call-expression matcher for patterns
//! like `console.log('...')`) live in the `fold-core-match-simple` crate.
//!
//! # Module Description
//!
//! - [`matcher`] - the [`RegionMatcher`] contract and match-list validation
//! - [`region`] - region data model, registry, and offset reconciliation
//! - [`session`] - the reconciliation engine and cursor synchronizer
//! - [`surface`] - the host editing-surface trait and an in-memory
//!   reference implementation
//! - [`overlay`] - per-collapsed-region data exported to the presentation
//!   layer
//! - [`error`] - the kernel error taxonomy
//!
//! # Coordinates
//!
//! All offsets are **char offsets** (Unicode scalar values), in one of two
//! coordinate systems: *canonical* (all regions expanded) or *current* (the
//! buffer as displayed). See [`region`] for the mapping between them.

pub mod error;
pub mod matcher;
pub mod overlay;
pub mod region;
pub mod session;
pub mod surface;
mod text;

pub use error::FoldError;
pub use matcher::{RawMatch, RegionMatcher, normalize_matches, validate_matches};
pub use overlay::Overlay;
pub use region::{FoldState, Region, RegionId, RegionIdAllocator, RegionSet};
pub use session::{FoldChange, FoldChangeCallback, FoldChangeKind, FoldSession};
pub use surface::{EditSurface, MemorySurface};
