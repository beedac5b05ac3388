//! Integration tests for the composition builders.
//!
//! Exercises cross-crate interactions between clipforge-core,
//! clipforge-annotate, and clipforge-compose.

use clipforge_annotate::{Annotation, LayerContent, TextAnnotation};
use clipforge_compose::{
    MultiClipBuilder, OpacityDirective, SingleClipBuilder, SourceClip, TrimBuilder,
};
use clipforge_core::{RationalTime, Rect, Size, TimeRange};

use crate::support::{audio_only, init_tracing, landscape, portrait, MockInspector};

fn secs(s: i64) -> RationalTime {
    RationalTime::from_secs(s)
}

// ── Multi-clip timeline ─────────────────────────────────────────

#[test]
fn two_clips_cross_fade_on_a_square_canvas() {
    let inspector = MockInspector::new()
        .with("a.mov", landscape(5))
        .with("b.mov", landscape(3));
    let out = MultiClipBuilder::new(inspector)
        .with_cross_fade(true)
        .build(&[SourceClip::new("a.mov"), SourceClip::new("b.mov")])
        .unwrap();

    let c = &out.composition;
    assert_eq!(c.render_size, Size::new(1280.0, 1280.0));
    assert_eq!(c.duration(), secs(8));
    assert!(c.validate().is_ok());

    let video = c.video_track.as_ref().unwrap();
    assert_eq!(video.segments()[0].timeline_range(), TimeRange::new(secs(0), secs(5)));
    assert_eq!(video.segments()[1].timeline_range(), TimeRange::new(secs(5), secs(3)));

    // The first clip ramps from opaque to transparent over [5, 6).
    let ramp = c.instructions[0]
        .layers
        .iter()
        .find_map(|l| match l.opacity {
            OpacityDirective::Ramp { from, to, range } => Some((from, to, range)),
            _ => None,
        })
        .unwrap();
    assert_eq!(ramp, (1.0, 0.0, TimeRange::new(secs(5), secs(1))));
}

#[test]
fn sources_without_video_are_skipped() {
    init_tracing();
    let inspector = MockInspector::new()
        .with("a.mov", landscape(5))
        .with("voice.m4a", audio_only(5))
        .with("b.mov", landscape(3));
    let out = MultiClipBuilder::new(inspector)
        .build(&[
            SourceClip::new("a.mov"),
            SourceClip::new("voice.m4a"),
            SourceClip::new("b.mov"),
        ])
        .unwrap();

    let video = out.composition.video_track.as_ref().unwrap();
    assert_eq!(video.segments().len(), 2);
    assert_eq!(out.composition.duration(), secs(8));
}

#[test]
fn empty_source_list_builds_a_zero_duration_composition() {
    let out = MultiClipBuilder::new(MockInspector::new()).build(&[]).unwrap();
    assert_eq!(out.composition.duration(), RationalTime::ZERO);
    assert!(out.composition.instructions.is_empty());
    assert!(out.composition.validate().is_ok());
}

// ── Orientation end to end ──────────────────────────────────────

#[test]
fn portrait_source_swaps_render_size_in_every_builder() {
    let single = SingleClipBuilder::new(MockInspector::new().with("p.mov", portrait(4)))
        .build(&SourceClip::new("p.mov"), &[])
        .unwrap();
    assert_eq!(single.composition.render_size, Size::new(1080.0, 1920.0));

    let trim = TrimBuilder::new(MockInspector::new().with("p.mov", portrait(4)))
        .build(std::path::Path::new("p.mov"), TimeRange::new(secs(1), secs(2)))
        .unwrap();
    assert_eq!(trim.composition.render_size, Size::new(1080.0, 1920.0));
}

// ── Annotations ─────────────────────────────────────────────────

#[test]
fn annotations_ride_above_background_and_video() {
    let inspector = MockInspector::new().with("a.mov", landscape(10));
    let annotations = vec![Annotation::Text(TextAnnotation::new(
        "take one",
        Rect::new(40.0, 40.0, 200.0, 30.0),
    ))];
    let out = SingleClipBuilder::new(inspector)
        .build(&SourceClip::new("a.mov"), &annotations)
        .unwrap();

    let overlay = out.overlay.unwrap();
    assert_eq!(overlay.video_layer_index(), Some(1));
    assert_eq!(overlay.annotation_count(), 1);
    assert!(matches!(
        overlay.layers().last().unwrap().content,
        LayerContent::Text(_)
    ));
}
