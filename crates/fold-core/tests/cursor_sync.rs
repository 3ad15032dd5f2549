use fold_core::matcher::{RawMatch, RegionMatcher};
use fold_core::{EditSurface, FoldSession, FoldState, MemorySurface};
use pretty_assertions::assert_eq;

/// Matches the literal marker `<fold>`, folding it to `<f>`.
struct MarkerMatcher;

impl RegionMatcher for MarkerMatcher {
    fn matches(&self, canonical_text: &str) -> Vec<RawMatch> {
        canonical_text
            .match_indices("<fold>")
            .map(|(byte, needle)| RawMatch::new(canonical_text[..byte].chars().count(), needle))
            .collect()
    }

    fn display_text(&self, _full_text: &str) -> String {
        "<f>".to_string()
    }
}

fn attach(text: &str) -> (MemorySurface, FoldSession) {
    let mut surface = MemorySurface::new(text);
    let mut session = FoldSession::new(Box::new(MarkerMatcher));
    session.attach(&mut surface).unwrap();
    (surface, session)
}

#[test]
fn test_single_move_collapses_every_expanded_region_not_under_cursor() {
    let (mut surface, mut session) = attach("x <fold> y <fold> z <fold> w");
    session.expand_all(&mut surface);
    assert_eq!(surface.text(), "x <fold> y <fold> z <fold> w");

    // One explicit move lands inside the middle region; the other two are
    // expanded but no longer contain the cursor, so both collapse. The walk
    // must stay correct while its own flips shift downstream offsets.
    session.on_cursor_moved(&mut surface, 13, true).unwrap();

    assert_eq!(surface.text(), "x <f> y <fold> z <f> w");
    let states: Vec<FoldState> = session
        .regions()
        .regions()
        .iter()
        .map(|r| r.state())
        .collect();
    assert_eq!(
        states,
        vec![
            FoldState::Collapsed,
            FoldState::Expanded,
            FoldState::Collapsed
        ]
    );
}

#[test]
fn test_overlays_follow_toggles() {
    let (mut surface, mut session) = attach("x <fold> y <fold> z <fold> w");
    session.expand_all(&mut surface);
    session.on_cursor_moved(&mut surface, 13, true).unwrap();

    let overlays = session.overlays();
    assert_eq!(overlays.len(), 2);
    assert_eq!(overlays[0].offset, 2);
    assert_eq!(overlays[1].offset, 17);
    assert!(overlays.iter().all(|o| o.text == "<f>"));
}

#[test]
fn test_walking_into_each_placeholder_expands_exactly_one() {
    let (mut surface, mut session) = attach("x <fold> y <fold> z");
    assert_eq!(surface.text(), "x <f> y <f> z");

    // Step into the first placeholder (span 2..5).
    session.on_cursor_moved(&mut surface, 3, true).unwrap();
    assert_eq!(surface.text(), "x <fold> y <f> z");

    // Move toward the second placeholder. The walk collapses the first
    // region before testing the second, which shifts the second placeholder
    // from 11..14 to 8..11, so offset 9 falls strictly inside it.
    session.on_cursor_moved(&mut surface, 9, true).unwrap();
    assert_eq!(surface.text(), "x <f> y <fold> z");
}

#[test]
fn test_cursor_offset_survives_toggles() {
    let (mut surface, mut session) = attach("x <fold> y");

    session.on_cursor_moved(&mut surface, 3, true).unwrap();
    assert_eq!(surface.cursor_offset(), 3);

    session.on_cursor_moved(&mut surface, 1, true).unwrap();
    assert_eq!(surface.cursor_offset(), 1);
}

#[test]
fn test_versions_count_state_changing_passes_only() {
    let (mut surface, mut session) = attach("x <fold> y");
    assert_eq!(session.version(), 1); // the attach pass

    // Boundary offsets toggle nothing and leave the version alone.
    session.on_cursor_moved(&mut surface, 2, true).unwrap();
    session.on_cursor_moved(&mut surface, 5, true).unwrap();
    assert_eq!(session.version(), 1);

    session.on_cursor_moved(&mut surface, 3, true).unwrap();
    assert_eq!(session.version(), 2);
}
