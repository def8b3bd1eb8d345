//! End-to-end slider behavior against an in-memory page.

mod support;

use hotsplit_core::session_record::{SessionRecorder, SessionTrace, replay};
use hotsplit_core::{
    HostInput, InputDispatcher, PointerSource, SliderConfig, SplitSliderController,
    SubscriptionId, bootstrap,
};
use pretty_assertions::assert_eq;
use support::{FakePage, FakeWidget};

const MOUSE: PointerSource = PointerSource::Mouse;

fn page(widgets: Vec<FakeWidget>) -> FakePage {
    FakePage { widgets }
}

fn first_id(dispatcher: &InputDispatcher<FakeWidget>) -> SubscriptionId {
    dispatcher.ids().next().expect("one widget registered")
}

#[test]
fn default_initial_split_renders_half() {
    let widget = FakeWidget::complete(0.0, 100.0);
    let _dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    assert_eq!(widget.before_width(), Some(50.0));
    assert_eq!(widget.after_width(), Some(50.0));
}

#[test]
fn custom_initial_split_renders_clamped() {
    let low = FakeWidget::complete(0.0, 100.0).start("0.3");
    let high = FakeWidget::complete(0.0, 100.0).start("1.4");
    let _dispatcher = bootstrap(&page(vec![low.clone(), high.clone()]), &SliderConfig::default());
    assert_eq!((low.before_width(), low.after_width()), (Some(30.0), Some(70.0)));
    assert_eq!((high.before_width(), high.after_width()), (Some(100.0), Some(0.0)));
}

#[test]
fn missing_part_attaches_nothing_and_writes_nothing() {
    for missing in ["BeforeMask", "AfterMask", "DragHotspot"] {
        let classes: Vec<&str> = ["BeforeMask", "AfterMask", "DragHotspot"]
            .into_iter()
            .filter(|c| *c != missing)
            .collect();
        let widget = FakeWidget::with_parts(0.0, 100.0, &classes);
        let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
        assert!(dispatcher.is_empty(), "missing {missing} must stay inert");

        dispatcher.pointer_move(MOUSE, 10.0);
        dispatcher.release(MOUSE);
        for class in &classes {
            assert!(widget.part(class).writes().is_empty());
        }
    }
}

#[test]
fn handle_is_optional() {
    let widget = FakeWidget::with_parts(0.0, 100.0, &["BeforeMask", "AfterMask", "DragHotspot"]);
    let dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    assert_eq!(dispatcher.len(), 1);
    assert_eq!(widget.before_width(), Some(50.0));
}

#[test]
fn drag_session_scenario() {
    let widget = FakeWidget::complete(100.0, 200.0);
    let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let id = first_id(&dispatcher);

    let pressed = dispatcher.press(id, MOUSE, 150.0);
    assert!(pressed.prevent_default);
    assert_eq!(pressed.reacted, vec![id]);
    assert_eq!(widget.before_width(), Some(25.0));
    assert_eq!(widget.after_width(), Some(75.0));

    dispatcher.pointer_move(MOUSE, 300.0);
    assert_eq!(widget.before_width(), Some(100.0));
    assert_eq!(widget.after_width(), Some(0.0));

    dispatcher.release(MOUSE);
    let after_release = dispatcher.pointer_move(MOUSE, 150.0);
    assert!(after_release.reacted.is_empty());
    assert_eq!(widget.before_width(), Some(100.0));
}

#[test]
fn touch_drag_tracks_like_mouse() {
    let widget = FakeWidget::complete(0.0, 400.0);
    let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let id = first_id(&dispatcher);
    dispatcher.press(id, PointerSource::Touch, 100.0);
    dispatcher.pointer_move(PointerSource::Touch, 300.0);
    assert_eq!(widget.before_width(), Some(75.0));
    dispatcher.release(PointerSource::Touch);
    dispatcher.pointer_move(PointerSource::Touch, 0.0);
    assert_eq!(widget.before_width(), Some(75.0));
}

#[test]
fn drag_leaving_widget_clamps_at_edges() {
    let widget = FakeWidget::complete(100.0, 200.0);
    let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let id = first_id(&dispatcher);
    dispatcher.press(id, MOUSE, 200.0);
    dispatcher.pointer_move(MOUSE, -500.0);
    assert_eq!(widget.before_width(), Some(0.0));
    assert_eq!(widget.after_width(), Some(100.0));
}

#[test]
fn instances_are_isolated() {
    let left = FakeWidget::complete(0.0, 100.0);
    let right = FakeWidget::complete(200.0, 100.0).start("0.8");
    let mut dispatcher =
        bootstrap(&page(vec![left.clone(), right.clone()]), &SliderConfig::default());
    let ids: Vec<SubscriptionId> = dispatcher.ids().collect();
    assert_eq!(ids.len(), 2);

    dispatcher.press(ids[0], MOUSE, 10.0);
    let moved = dispatcher.pointer_move(MOUSE, 250.0);
    assert_eq!(moved.reacted, vec![ids[0]]);
    dispatcher.release(MOUSE);
    assert_eq!(left.before_width(), Some(100.0));
    assert_eq!(right.writes_len(), 1);
    assert_eq!(right.before_width(), Some(80.0));

    dispatcher.press(ids[1], MOUSE, 225.0);
    dispatcher.pointer_move(MOUSE, 0.0);
    dispatcher.release(MOUSE);
    assert_eq!(right.before_width(), Some(0.0));
    assert_eq!(left.before_width(), Some(100.0));
}

#[test]
fn bootstrap_follows_document_order_and_selector() {
    let first = FakeWidget::complete(0.0, 100.0).start("0.1");
    let other = FakeWidget::complete(0.0, 100.0).class("Gallery");
    let second = FakeWidget::complete(0.0, 100.0).start("0.9");
    let dispatcher = bootstrap(
        &page(vec![first.clone(), other.clone(), second.clone()]),
        &SliderConfig::default(),
    );
    let ratios: Vec<f64> = dispatcher
        .ratios()
        .filter_map(|(_, ratio)| ratio.map(|r| r.get()))
        .collect();
    assert_eq!(ratios, vec![0.1, 0.9]);
    assert_eq!(other.before_width(), None);
}

#[test]
fn custom_config_selects_other_roots() {
    let widget = FakeWidget::complete(0.0, 100.0).class("Compare");
    let config = SliderConfig::from_json(r#"{"rootSelector":".Compare"}"#).unwrap();
    let dispatcher = bootstrap(&page(vec![widget.clone()]), &config);
    assert_eq!(dispatcher.len(), 1);
}

#[test]
fn disposed_widget_ignores_later_input() {
    let widget = FakeWidget::complete(0.0, 100.0);
    let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let id = first_id(&dispatcher);
    dispatcher.press(id, MOUSE, 20.0);
    let controller = dispatcher.dispose(id).expect("registered");
    assert!(controller.is_dragging());

    dispatcher.pointer_move(MOUSE, 90.0);
    assert!(dispatcher.press(id, MOUSE, 90.0).reacted.is_empty());
    assert_eq!(widget.before_width(), Some(20.0));
    assert!(dispatcher.dispose(id).is_none());
}

#[test]
fn zero_width_root_keeps_previous_split() {
    let widget = FakeWidget::complete(100.0, 200.0);
    let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let id = first_id(&dispatcher);
    dispatcher.press(id, MOUSE, 150.0);
    widget.set_rect(100.0, 0.0);
    dispatcher.pointer_move(MOUSE, 400.0);
    assert_eq!(widget.before_width(), Some(25.0));
    widget.set_rect(100.0, 200.0);
    dispatcher.pointer_move(MOUSE, 200.0);
    assert_eq!(widget.before_width(), Some(50.0));
}

#[test]
fn press_without_target_is_ignored() {
    let widget = FakeWidget::complete(0.0, 100.0);
    let mut dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let outcome = dispatcher.apply(HostInput {
        widget: None,
        input: hotsplit_core::SliderInput::Press {
            source: MOUSE,
            client_x: 10.0,
        },
    });
    assert!(!outcome.prevent_default);
    assert!(outcome.reacted.is_empty());
    assert_eq!(widget.writes_len(), 1);
}

#[test]
fn controller_is_usable_without_dispatcher() {
    let widget = FakeWidget::complete(0.0, 200.0);
    let mut controller = SplitSliderController::attach(widget.clone(), &SliderConfig::default());
    assert_eq!(controller.compute_ratio_from_pointer(50.0), Some(0.25));
    controller.set_split(0.6);
    controller.set_split(0.6);
    assert_eq!(widget.part("BeforeMask").writes(), vec![50.0, 60.0, 60.0]);
}

fn recorded_session(widget: &FakeWidget) -> SessionTrace {
    let dispatcher = bootstrap(&page(vec![widget.clone()]), &SliderConfig::default());
    let id = first_id(&dispatcher);
    let mut recorder = SessionRecorder::new(dispatcher);
    recorder.apply(HostInput::press(id, MOUSE, 150.0));
    recorder.apply(HostInput::pointer_move(MOUSE, 260.0));
    recorder.apply(HostInput::release(MOUSE));
    recorder.apply(HostInput::pointer_move(MOUSE, 120.0));
    recorder.finish()
}

#[test]
fn record_replay_identical_checksums() {
    let trace = recorded_session(&FakeWidget::complete(100.0, 200.0));
    assert_eq!(trace.frame_count(), 5);

    let fresh = FakeWidget::complete(100.0, 200.0);
    let dispatcher = bootstrap(&page(vec![fresh.clone()]), &SliderConfig::default());
    let result = replay(dispatcher, &trace).expect("replay should run");
    assert!(result.ok(), "mismatches: {:?}", result.mismatches);
    assert_eq!(result.total_frames, 5);
    assert_eq!(Some(result.final_checksum_chain), trace.final_checksum_chain());
    assert_eq!(fresh.before_width(), Some(80.0));
}

#[test]
fn replay_detects_geometry_divergence() {
    let trace = recorded_session(&FakeWidget::complete(100.0, 200.0));
    let shifted = FakeWidget::complete(0.0, 200.0);
    let dispatcher = bootstrap(&page(vec![shifted]), &SliderConfig::default());
    let result = replay(dispatcher, &trace).expect("replay should run");
    assert!(!result.ok());
    // Frame 0 is the initial render, identical on both pages.
    assert_eq!(result.mismatches[0].frame_idx, 1);
}

#[test]
fn replay_survives_jsonl_round_trip() {
    let trace = recorded_session(&FakeWidget::complete(100.0, 200.0));
    let jsonl = trace.to_jsonl().expect("trace serializes");
    assert_eq!(jsonl.lines().count(), trace.records.len());
    let loaded = SessionTrace::from_jsonl(&jsonl).expect("trace parses");
    assert_eq!(loaded, trace);
}

#[test]
fn replay_rejects_widget_count_mismatch() {
    let trace = recorded_session(&FakeWidget::complete(100.0, 200.0));
    let dispatcher = bootstrap(&page(Vec::new()), &SliderConfig::default());
    let err = replay(dispatcher, &trace).unwrap_err();
    assert_eq!(
        err,
        hotsplit_core::session_record::ReplayError::WidgetCountMismatch {
            expected: 1,
            actual: 0
        }
    );
}
