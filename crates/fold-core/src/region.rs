//! Region registry and offset reconciliation.
//!
//! A [`Region`] is one matched, foldable span of text with two
//! representations (full/display) and a fold state. [`RegionSet`] owns the
//! authoritative ordered list of regions for one canonical-text snapshot and
//! keeps their derived current offsets consistent.
//!
//! Two coordinate systems are in play:
//!
//! - **canonical offsets**: positions in the fully expanded text, fixed at
//!   region creation;
//! - **current offsets**: positions in the buffer as displayed, where every
//!   collapsed region upstream shortens the buffer by
//!   `len(full_text) - len(display_text)` chars.
//!
//! All offsets are char offsets.

use crate::error::FoldError;
use crate::matcher::{self, RawMatch, RegionMatcher};
use crate::overlay::Overlay;
use crate::text;

/// Fold state of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldState {
    /// The region shows its full matched text.
    Expanded,
    /// The region shows its shorter placeholder text.
    Collapsed,
}

/// Opaque region identity.
///
/// Assigned monotonically increasing at creation, stable for the region's
/// lifetime, never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u64);

/// Allocates monotonically increasing region ids for one session.
#[derive(Debug, Clone, Default)]
pub struct RegionIdAllocator {
    next: u64,
}

impl RegionIdAllocator {
    /// Create an allocator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&mut self) -> RegionId {
        let id = RegionId(self.next);
        self.next += 1;
        id
    }
}

/// One matched, foldable span of text.
///
/// `full_text` is immutable once created; only `state` and the derived
/// `current_offset` change over a region's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: RegionId,
    canonical_offset: usize,
    current_offset: usize,
    full_text: String,
    display_text: String,
    state: FoldState,
}

impl Region {
    /// Region identity.
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Start offset within the canonical (fully expanded) text.
    pub fn canonical_offset(&self) -> usize {
        self.canonical_offset
    }

    /// Start offset within the current (mixed fold-state) buffer.
    pub fn current_offset(&self) -> usize {
        self.current_offset
    }

    /// The original matched text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The placeholder text substituted when collapsed.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Current fold state.
    pub fn state(&self) -> FoldState {
        self.state
    }

    /// Returns `true` if the region is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.state == FoldState::Collapsed
    }

    /// Char length of the full text.
    pub fn full_len(&self) -> usize {
        text::char_len(&self.full_text)
    }

    /// Char length of the display text.
    pub fn display_len(&self) -> usize {
        text::char_len(&self.display_text)
    }

    /// Chars removed from the buffer while this region is collapsed.
    pub fn collapse_delta(&self) -> usize {
        self.full_len() - self.display_len()
    }

    /// Char length this region occupies in the current buffer.
    pub fn current_len(&self) -> usize {
        match self.state {
            FoldState::Expanded => self.full_len(),
            FoldState::Collapsed => self.display_len(),
        }
    }

    /// Exclusive end of the span this region occupies in the current buffer.
    pub fn current_end(&self) -> usize {
        self.current_offset + self.current_len()
    }

    /// Exclusive end of the region's canonical span.
    pub fn canonical_end(&self) -> usize {
        self.canonical_offset + self.full_len()
    }

    /// Returns `true` if `offset` falls strictly inside the span this region
    /// occupies in the current buffer. Boundary offsets are outside.
    pub fn current_span_contains(&self, offset: usize) -> bool {
        self.current_offset < offset && offset < self.current_end()
    }

    /// Returns `true` if `offset` falls strictly inside the region's
    /// canonical span. Boundary offsets are outside.
    pub fn canonical_span_contains(&self, offset: usize) -> bool {
        self.canonical_offset < offset && offset < self.canonical_end()
    }
}

/// Ordered registry of the current regions and their fold state.
///
/// Regions are stored in ascending canonical order; a region's index in
/// [`regions`](RegionSet::regions) is its order. A set is built fresh for one
/// canonical-text snapshot and discarded wholesale at the next
/// reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Create an empty region set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh region set from a matcher's results.
    ///
    /// `matches` must be ascending, non-overlapping, non-empty and in
    /// bounds; violations are rejected fail-fast and no partial set is
    /// built.
    /// `policy` decides each region's initial state from its raw match; ids
    /// are drawn from `ids` in match order. Current offsets are recomputed
    /// before returning.
    pub fn build(
        canonical_text: &str,
        matches: &[RawMatch],
        matcher: &dyn RegionMatcher,
        mut policy: impl FnMut(&RawMatch) -> FoldState,
        ids: &mut RegionIdAllocator,
    ) -> Result<Self, FoldError> {
        matcher::validate_matches(canonical_text, matches)?;

        let mut regions = Vec::with_capacity(matches.len());
        for m in matches {
            let display_text = matcher.display_text(&m.text);
            let display_len = text::char_len(&display_text);
            if display_len > m.len() {
                return Err(FoldError::DisplayTooLong {
                    offset: m.start,
                    full_len: m.len(),
                    display_len,
                });
            }

            regions.push(Region {
                id: ids.next_id(),
                canonical_offset: m.start,
                current_offset: m.start,
                full_text: m.text.clone(),
                display_text,
                state: policy(m),
            });
        }

        let mut set = Self { regions };
        set.recompute_current_offsets();
        Ok(set)
    }

    /// Regions in ascending canonical order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if the set holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of collapsed regions.
    pub fn collapsed_count(&self) -> usize {
        self.regions.iter().filter(|r| r.is_collapsed()).count()
    }

    /// Recompute every region's current offset from the states of the
    /// regions before it.
    ///
    /// Must run after any state change: collapsing or expanding one region
    /// shifts the current offset of every region after it.
    pub fn recompute_current_offsets(&mut self) {
        let mut hidden = 0usize;
        for region in &mut self.regions {
            region.current_offset = region.canonical_offset - hidden;
            if region.state == FoldState::Collapsed {
                hidden += region.collapse_delta();
            }
        }
    }

    /// Render the current buffer from canonical text: collapsed regions show
    /// their display text, everything else is unchanged.
    ///
    /// Splices in descending order so earlier offsets stay valid while
    /// splicing. Exact inverse of [`expand_buffer`](Self::expand_buffer).
    pub fn render_buffer(&self, canonical_text: &str) -> String {
        let mut out = canonical_text.to_string();
        for region in self.regions.iter().rev() {
            if region.is_collapsed() {
                out = text::splice(
                    &out,
                    region.canonical_offset,
                    region.full_len(),
                    &region.display_text,
                );
            }
        }
        out
    }

    /// Restore the full text at every collapsed region's current offset.
    ///
    /// The inverse of [`render_buffer`](Self::render_buffer). Splicing is
    /// based on each region's last known current offset, so this also undoes
    /// placeholders in a buffer that was edited around (or inside) them.
    pub fn expand_buffer(&self, current_text: &str) -> String {
        let mut out = current_text.to_string();
        for region in self.regions.iter().rev() {
            if region.is_collapsed() {
                out = text::splice(
                    &out,
                    region.current_offset,
                    region.display_len(),
                    &region.full_text,
                );
            }
        }
        out
    }

    /// Map a char offset in the current buffer to the corresponding offset
    /// in the canonical text.
    ///
    /// Offsets inside a collapsed placeholder keep their distance from the
    /// region start.
    pub fn current_to_canonical(&self, offset: usize) -> usize {
        let mut hidden = 0usize;
        for region in &self.regions {
            if region.current_offset >= offset {
                break;
            }
            if region.is_collapsed() && region.current_end() <= offset {
                hidden += region.collapse_delta();
            }
        }
        offset + hidden
    }

    /// Flip the state of the region at `index` and recompute current offsets.
    pub(crate) fn toggle(&mut self, index: usize) {
        let region = &mut self.regions[index];
        region.state = match region.state {
            FoldState::Expanded => FoldState::Collapsed,
            FoldState::Collapsed => FoldState::Expanded,
        };
        self.recompute_current_offsets();
    }

    /// Expand every region.
    pub fn expand_all(&mut self) {
        for region in &mut self.regions {
            region.state = FoldState::Expanded;
        }
        self.recompute_current_offsets();
    }

    /// Collapse every region.
    pub fn collapse_all(&mut self) {
        for region in &mut self.regions {
            region.state = FoldState::Collapsed;
        }
        self.recompute_current_offsets();
    }

    /// One [`Overlay`] per collapsed region, in ascending current order.
    pub fn overlays(&self) -> Vec<Overlay> {
        self.regions
            .iter()
            .filter(|r| r.is_collapsed())
            .map(|r| Overlay {
                id: r.id,
                offset: r.current_offset,
                text: r.display_text.clone(),
            })
            .collect()
    }
}
