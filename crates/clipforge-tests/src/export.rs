//! Integration tests for the export pipeline: builder output submitted
//! through the runner to a media engine.

use std::path::Path;

use clipforge_compose::{MultiClipBuilder, SingleClipBuilder, SourceClip};
use clipforge_core::ClipForgeError;
use clipforge_media::{ContainerFormat, ExportOutcome, ExportRunner, ExportState};
use uuid::Uuid;

use crate::support::{init_tracing, landscape, MockEngine, MockInspector};

fn single_clip_build() -> clipforge_compose::BuildOutput {
    let inspector = MockInspector::new().with("a.mov", landscape(5));
    SingleClipBuilder::new(inspector)
        .build(&SourceClip::new("a.mov"), &[])
        .unwrap()
}

// ── Happy path ──────────────────────────────────────────────────

#[test]
fn build_then_export_completes_with_a_uuid_named_file() {
    let engine = MockEngine::completing();
    let request_slot = engine.last_request.clone();
    let runner = ExportRunner::new(engine);

    let ticket = runner
        .submit(single_clip_build(), Path::new("/tmp/exports"), ContainerFormat::Mov)
        .unwrap();

    // The file name is the job id with the container extension.
    let stem = ticket.output.file_stem().unwrap().to_string_lossy().into_owned();
    assert_eq!(stem.parse::<Uuid>().unwrap(), ticket.job_id);
    assert_eq!(ticket.output.extension().unwrap(), "mov");

    // The engine saw the composition the builder produced.
    let request = request_slot.lock().take().unwrap();
    assert_eq!(request.composition.duration(), clipforge_core::RationalTime::from_secs(5));
    assert!(request.overlay.is_some());

    let expected = ticket.output.clone();
    assert_eq!(ticket.wait(), ExportOutcome::Completed { output: expected });
}

// ── Terminal-state discipline ───────────────────────────────────

#[test]
fn exactly_one_outcome_reaches_the_ticket() {
    let runner = ExportRunner::new(MockEngine::completing());
    let ticket = runner
        .submit(single_clip_build(), Path::new("/tmp"), ContainerFormat::Mp4)
        .unwrap();

    assert_eq!(ticket.state(), ExportState::Completed);
    assert!(ticket.try_outcome().is_some());
    // The channel held one outcome; a second read finds nothing and the
    // state stays terminal.
    assert!(ticket.try_outcome().is_none());
    assert_eq!(ticket.state(), ExportState::Completed);
}

#[test]
fn engine_failure_surfaces_the_reason() {
    init_tracing();
    let runner = ExportRunner::new(MockEngine::failing("disk full"));
    let ticket = runner
        .submit(single_clip_build(), Path::new("/tmp"), ContainerFormat::Mov)
        .unwrap();
    assert_eq!(ticket.state(), ExportState::Failed);
    assert_eq!(
        ticket.wait(),
        ExportOutcome::Failed {
            reason: "disk full".into()
        }
    );
}

// ── Degenerate compositions ─────────────────────────────────────

#[test]
fn zero_duration_composition_fails_at_submit() {
    let build = MultiClipBuilder::new(MockInspector::new()).build(&[]).unwrap();
    assert_eq!(build.composition.duration(), clipforge_core::RationalTime::ZERO);

    let runner = ExportRunner::new(MockEngine::completing());
    let err = runner
        .submit(build, Path::new("/tmp"), ContainerFormat::Mov)
        .unwrap_err();
    assert!(matches!(err, ClipForgeError::ExportFailed(_)));
}
