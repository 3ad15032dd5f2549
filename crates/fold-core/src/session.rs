//! The folding session: reconciliation engine and cursor synchronizer.
//!
//! # Overview
//!
//! [`FoldSession`] is the orchestrator that owns all shared mutable state:
//! the region registry, the suppress flag, the id allocator and the cached
//! canonical text. Hosts create one session per document, run
//! [`attach`](FoldSession::attach) once, and then forward the editing
//! surface's events:
//!
//! - content-changed → [`on_content_changed`](FoldSession::on_content_changed)
//!   (the reconciliation engine): expand everything back to canonical text,
//!   re-run the matcher, re-fold according to the cursor policy, and emit the
//!   resulting buffer.
//! - cursor-moved → [`on_cursor_moved`](FoldSession::on_cursor_moved)
//!   (the cursor synchronizer): toggle regions as the cursor enters or
//!   leaves their displayed spans.
//!
//! # Reentrancy
//!
//! Both handlers mutate the surface programmatically, which on most editing
//! surfaces re-fires the content-changed notification. The session raises
//! its suppress flag around every programmatic mutation and both handlers
//! early-return while it is up, so at most one logical reconciliation or
//! toggle operation is in flight at a time. The flag assumes notifications
//! are delivered synchronously from `set_text`; hosts that queue events can
//! check [`is_suppressed`](FoldSession::is_suppressed) and drop
//! self-inflicted notifications themselves.

use log::{debug, warn};

use crate::error::FoldError;
use crate::matcher::RegionMatcher;
use crate::overlay::Overlay;
use crate::region::{FoldState, RegionIdAllocator, RegionSet};
use crate::surface::EditSurface;
use crate::text;

/// What a completed session pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldChangeKind {
    /// The region set was rebuilt from a changed canonical text.
    Reconciled,
    /// One or more regions toggled without a canonical text change.
    Toggled,
}

/// Change record passed to subscribers after a pass that changed fold state.
///
/// Presentation layers typically react by re-querying
/// [`FoldSession::overlays`].
#[derive(Debug, Clone)]
pub struct FoldChange {
    /// What kind of pass completed.
    pub kind: FoldChangeKind,
    /// Session version after the pass (incremented once per pass).
    pub version: u64,
    /// Number of regions currently tracked.
    pub region_count: usize,
    /// Number of currently collapsed regions.
    pub collapsed_count: usize,
}

/// Fold change callback function type.
pub type FoldChangeCallback = Box<dyn FnMut(&FoldChange)>;

/// A region-folding session bound to one document.
///
/// The session keeps the buffer shown by the editing surface consistent with
/// the fold state of every matched region, across external edits and cursor
/// movement. Regions are rebuilt from scratch on every external edit; their
/// identity is only meaningful between two edits.
pub struct FoldSession {
    matcher: Box<dyn RegionMatcher>,
    regions: RegionSet,
    /// Canonical text as of the last completed reconciliation pass.
    canonical: String,
    ids: RegionIdAllocator,
    /// Last cursor offset reported by an explicit user action, in
    /// current-buffer coordinates.
    cursor: usize,
    /// Reentrancy guard, raised across programmatic surface mutations.
    suppress: bool,
    version: u64,
    callbacks: Vec<FoldChangeCallback>,
}

impl FoldSession {
    /// Create a session with the given matcher.
    ///
    /// No surface work happens until [`attach`](Self::attach).
    pub fn new(matcher: Box<dyn RegionMatcher>) -> Self {
        Self {
            matcher,
            regions: RegionSet::new(),
            canonical: String::new(),
            ids: RegionIdAllocator::new(),
            cursor: 0,
            suppress: false,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Run the initial match-and-fold pass over the surface's content.
    ///
    /// Every matched region collapses unless the surface cursor already sits
    /// strictly inside its span.
    pub fn attach(&mut self, surface: &mut dyn EditSurface) -> Result<(), FoldError> {
        self.regions = RegionSet::new();
        self.canonical.clear();
        self.cursor = surface.cursor_offset();
        self.reconcile(surface)
    }

    /// Handle the surface's content-changed notification.
    ///
    /// No-op while a programmatic mutation is in flight. Otherwise rebuilds
    /// the region set from the edited text: placeholders are expanded at
    /// their last known offsets, the matcher re-runs over the canonical
    /// text, and every fresh region collapses unless the pre-edit cursor sat
    /// strictly inside its canonical span. A user typing inside a matched
    /// region is never shown their own keystrokes collapsed.
    pub fn on_content_changed(&mut self, surface: &mut dyn EditSurface) -> Result<(), FoldError> {
        if self.suppress {
            return Ok(());
        }
        self.reconcile(surface)
    }

    /// Handle the surface's cursor-moved notification.
    ///
    /// Ignored unless `is_explicit_user_action` is true (cursor moves caused
    /// by the session's own programmatic edits must not recurse into
    /// toggling) and no programmatic mutation is in flight.
    ///
    /// Walks regions in ascending order: an expanded region whose span no
    /// longer strictly contains the cursor collapses, a collapsed region
    /// whose placeholder span strictly contains the cursor expands. Span
    /// containment is strict on both ends: a cursor sitting exactly on a
    /// span boundary toggles nothing, in either direction of travel. Each
    /// flip is spliced into the buffer and emitted before the next region is
    /// evaluated, since the flip shifts every later region's offset.
    pub fn on_cursor_moved(
        &mut self,
        surface: &mut dyn EditSurface,
        offset: usize,
        is_explicit_user_action: bool,
    ) -> Result<(), FoldError> {
        if !is_explicit_user_action || self.suppress {
            return Ok(());
        }
        self.cursor = offset;
        if self.regions.is_empty() {
            return Ok(());
        }

        let mut buffer = surface.text();
        let mut flipped = 0usize;

        for index in 0..self.regions.len() {
            let region = &self.regions.regions()[index];
            let inside = region.current_span_contains(offset);
            let flip = match region.state() {
                FoldState::Expanded => !inside,
                FoldState::Collapsed => inside,
            };
            if !flip {
                continue;
            }

            let start = region.current_offset();
            let (replaced_len, replacement) = match region.state() {
                FoldState::Expanded => (region.full_len(), region.display_text().to_string()),
                FoldState::Collapsed => (region.display_len(), region.full_text().to_string()),
            };

            self.regions.toggle(index);
            buffer = text::splice(&buffer, start, replaced_len, &replacement);
            self.emit(surface, &buffer, offset);
            flipped += 1;
        }

        // The rendered form of the cached canonical text is the only buffer
        // consistent with the recomputed offsets; anything else is drift.
        let expected = self.regions.render_buffer(&self.canonical);
        if surface.text() != expected {
            warn!("offset drift detected after cursor pass; expanding all regions and rebuilding");
            return self.recover(surface);
        }

        if flipped > 0 {
            debug!("cursor pass toggled {flipped} region(s) at offset {offset}");
            self.bump(FoldChangeKind::Toggled);
        }
        Ok(())
    }

    /// Collapse every region regardless of cursor position and emit the
    /// folded buffer.
    pub fn collapse_all(&mut self, surface: &mut dyn EditSurface) {
        if self.regions.collapsed_count() == self.regions.len() {
            return;
        }
        self.regions.collapse_all();
        let rendered = self.regions.render_buffer(&self.canonical);
        let cursor = surface.cursor_offset();
        self.emit(surface, &rendered, cursor);
        self.bump(FoldChangeKind::Toggled);
    }

    /// Expand every region and emit the fully expanded buffer.
    pub fn expand_all(&mut self, surface: &mut dyn EditSurface) {
        if self.regions.collapsed_count() == 0 {
            return;
        }
        self.regions.expand_all();
        let cursor = surface.cursor_offset();
        let canonical = self.canonical.clone();
        self.emit(surface, &canonical, cursor);
        self.bump(FoldChangeKind::Toggled);
    }

    /// Subscribe to fold changes.
    ///
    /// The callback runs after every completed pass that changed fold state.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&FoldChange) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// One [`Overlay`] per collapsed region, in ascending current order.
    pub fn overlays(&self) -> Vec<Overlay> {
        self.regions.overlays()
    }

    /// The current region registry.
    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// Canonical text as of the last completed reconciliation pass.
    pub fn canonical_text(&self) -> &str {
        &self.canonical
    }

    /// Session version, incremented once per fold-state-changing pass.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` while a programmatic surface mutation is in flight.
    ///
    /// Hosts that deliver surface notifications asynchronously can use this
    /// to drop self-inflicted events.
    pub fn is_suppressed(&self) -> bool {
        self.suppress
    }

    /// Rebuild the region set from the surface's current content.
    fn reconcile(&mut self, surface: &mut dyn EditSurface) -> Result<(), FoldError> {
        let raw = surface.text();
        let surface_cursor = surface.cursor_offset();

        // The edit may have landed anywhere, including inside or around a
        // folded span; expanding at the last known current offsets undoes
        // the placeholders regardless.
        let canonical = self.regions.expand_buffer(&raw);
        let cursor = self.regions.current_to_canonical(self.cursor);

        let matches = self.matcher.matches(&canonical);
        let regions = RegionSet::build(
            &canonical,
            &matches,
            self.matcher.as_ref(),
            |m| {
                if m.start < cursor && cursor < m.end() {
                    FoldState::Expanded
                } else {
                    FoldState::Collapsed
                }
            },
            &mut self.ids,
        )?;

        let rendered = regions.render_buffer(&canonical);

        self.regions = regions;
        self.canonical = canonical;
        self.emit(surface, &rendered, surface_cursor);

        debug!(
            "reconciled {} region(s) ({} collapsed)",
            self.regions.len(),
            self.regions.collapsed_count()
        );
        self.bump(FoldChangeKind::Reconciled);
        Ok(())
    }

    /// Offset-drift recovery: expand everything at the last known offsets,
    /// discard the region set, and rebuild from scratch.
    fn recover(&mut self, surface: &mut dyn EditSurface) -> Result<(), FoldError> {
        let expanded = self.regions.expand_buffer(&surface.text());
        let cursor = surface.cursor_offset();
        self.regions = RegionSet::new();
        self.canonical.clear();
        self.emit(surface, &expanded, cursor);
        self.reconcile(surface)
    }

    /// Apply a programmatic mutation to the surface under the suppress guard.
    fn emit(&mut self, surface: &mut dyn EditSurface, buffer: &str, cursor: usize) {
        self.suppress = true;
        surface.set_text(buffer);
        surface.set_cursor_offset(cursor);
        self.suppress = false;
    }

    fn bump(&mut self, kind: FoldChangeKind) {
        self.version += 1;
        if self.callbacks.is_empty() {
            return;
        }
        let change = FoldChange {
            kind,
            version: self.version,
            region_count: self.regions.len(),
            collapsed_count: self.regions.collapsed_count(),
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
