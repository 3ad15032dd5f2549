use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use fold_core::matcher::{RawMatch, RegionMatcher};
use fold_core::{EditSurface, FoldSession, MemorySurface};

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

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        out.push_str(&format!("{i:06} leading text <fold> trailing text\n"));
    }
    // Remove the final '\n' to avoid an extra trailing empty line.
    out.pop();
    out
}

fn bench_attach(c: &mut Criterion) {
    let text = large_text(1_000);
    c.bench_function("attach/1k_regions", |b| {
        b.iter(|| {
            let mut surface = MemorySurface::new(black_box(&text));
            let mut session = FoldSession::new(Box::new(MarkerMatcher));
            session.attach(&mut surface).unwrap();
            black_box(session.overlays().len());
        })
    });
}

fn bench_reconcile_after_edit(c: &mut Criterion) {
    let text = large_text(1_000);
    c.bench_function("reconcile_after_edit/1k_regions", |b| {
        b.iter_batched(
            || {
                let mut surface = MemorySurface::new(&text);
                let mut session = FoldSession::new(Box::new(MarkerMatcher));
                session.attach(&mut surface).unwrap();
                (surface, session)
            },
            |(mut surface, mut session)| {
                let end = surface.char_count();
                surface.splice(end, 0, "x");
                session.on_content_changed(&mut surface).unwrap();
                black_box(surface.text().len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_cursor_toggle(c: &mut Criterion) {
    let text = large_text(1_000);
    let mut surface = MemorySurface::new(&text);
    let mut session = FoldSession::new(Box::new(MarkerMatcher));
    session.attach(&mut surface).unwrap();

    // A placeholder well into the buffer, so the pass walks plenty of
    // upstream regions before and after the flip.
    let target = session.regions().regions()[500].current_offset() + 1;

    c.bench_function("cursor_toggle/expand_and_collapse", |b| {
        b.iter(|| {
            session.on_cursor_moved(&mut surface, target, true).unwrap();
            session.on_cursor_moved(&mut surface, 0, true).unwrap();
            black_box(session.version());
        })
    });
}

criterion_group!(
    benches,
    bench_attach,
    bench_reconcile_after_edit,
    bench_cursor_toggle
);
criterion_main!(benches);
