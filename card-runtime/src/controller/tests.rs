//! # Controller 测试

use std::cell::Cell;

use super::*;
use crate::animation::{Timeline, TimingCurve};
use crate::surface::{CardVisuals, VisualSnapshot};

const FRAME: f32 = 1.0 / 60.0;

fn controller(initial: CardState) -> (TransitionController, Rc<CardVisuals>) {
    let visuals = Rc::new(CardVisuals::default());
    let controller =
        TransitionController::new(&CardGeometry::default(), initial, visuals.clone()).unwrap();
    (controller, visuals)
}

/// 逐帧推进直到空闲
fn settle<E: AnimationExecutor>(controller: &mut TransitionController<E>) -> usize {
    let mut frames = 0;
    while controller.is_transitioning() {
        controller.tick(FRAME);
        frames += 1;
        assert!(frames < 10_000, "过渡没有结束");
    }
    frames
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// 记录启动次数的执行器
#[derive(Default)]
struct CountingExecutor {
    starts: Rc<Cell<usize>>,
}

impl AnimationExecutor for CountingExecutor {
    type Handle = Timeline;

    fn start(&mut self, from: f32, to: f32, duration: f32, curve: TimingCurve) -> Timeline {
        self.starts.set(self.starts.get() + 1);
        Timeline::new(from, to, duration, curve)
    }
}

fn counting_controller() -> (TransitionController<CountingExecutor>, Rc<Cell<usize>>) {
    let executor = CountingExecutor::default();
    let starts = executor.starts.clone();
    let controller = TransitionController::with_executor(
        &CardGeometry::default(),
        CardState::Collapsed,
        Rc::new(CardVisuals::default()),
        executor,
    )
    .unwrap();
    (controller, starts)
}

// -------------------------------------------------------------------------
// 构造
// -------------------------------------------------------------------------

#[test]
fn test_initial_state_written_to_surface() {
    let (c, visuals) = controller(CardState::Expanded);
    assert_eq!(c.current_state(), CardState::Expanded);
    assert_eq!(c.phase(), ControllerPhase::Idle { state: CardState::Expanded });
    assert_eq!(
        visuals.snapshot(),
        VisualSnapshot {
            offset_y: 244.0,
            corner_radius: 12.0,
            overlay_blur: 1.0,
        }
    );
    assert_eq!(c.fraction_complete(), None);
}

#[test]
fn test_construction_errors() {
    let geometry = CardGeometry {
        card_height: 0.0,
        ..Default::default()
    };
    let result = TransitionController::new(
        &geometry,
        CardState::Collapsed,
        Rc::new(CardVisuals::default()),
    );
    assert!(matches!(result, Err(CardError::InvalidGeometry { .. })));

    let (c, _) = controller(CardState::Collapsed);
    assert!(matches!(
        c.with_default_duration(0.0),
        Err(CardError::InvalidDuration(_))
    ));

    let result = TransitionController::from_parts(
        CardGeometry::default().animation_specs(),
        0.0,
        CardState::Collapsed,
        Rc::new(CardVisuals::default()),
        TimelineExecutor,
    );
    assert!(result.is_err());
}

// -------------------------------------------------------------------------
// toggle
// -------------------------------------------------------------------------

#[test]
fn test_toggle_flips_only_on_completion() {
    let (mut c, visuals) = controller(CardState::Collapsed);

    assert!(c.toggle(0.9));
    assert!(c.is_transitioning());
    assert_eq!(c.current_state(), CardState::Collapsed);

    c.tick(0.45);
    assert_eq!(c.current_state(), CardState::Collapsed);

    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Expanded);
    assert_eq!(visuals.snapshot().offset_y, 244.0);
    assert_eq!(visuals.snapshot().corner_radius, 12.0);
    assert_eq!(
        c.drain_events(),
        vec![
            TransitionEvent::Started {
                target: CardState::Expanded,
                interactive: false,
            },
            TransitionEvent::Completed {
                state: CardState::Expanded,
            },
        ]
    );
}

#[test]
fn test_toggle_ignored_while_running() {
    let (mut c, starts) = counting_controller();

    assert!(c.toggle(0.9));
    assert_eq!(starts.get(), 3);

    c.tick(0.3);
    assert!(!c.toggle(0.9));
    assert!(!c.toggle(0.1));
    assert_eq!(starts.get(), 3);

    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Expanded);

    assert!(c.toggle(0.9));
    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Collapsed);
    assert_eq!(starts.get(), 6);
}

#[test]
fn test_completion_reported_once() {
    let (mut c, _) = controller(CardState::Collapsed);
    c.toggle(0.2);
    settle(&mut c);
    let completed = c
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, TransitionEvent::Completed { .. }))
        .count();
    assert_eq!(completed, 1);

    c.tick(FRAME);
    c.tick(1.0);
    assert!(c.drain_events().is_empty());
}

// -------------------------------------------------------------------------
// 交互过渡
// -------------------------------------------------------------------------

#[test]
fn test_begin_twice_creates_single_run() {
    let (mut c, starts) = counting_controller();

    c.begin_interactive(0.9);
    c.begin_interactive(0.9);
    assert_eq!(starts.get(), 3);
    assert_eq!(c.paused_fraction(), 0.0);
    assert_eq!(
        c.phase(),
        ControllerPhase::Transitioning {
            target: CardState::Expanded,
            interactive: true,
        }
    );
}

#[test]
fn test_second_begin_recaptures_fraction() {
    let (mut c, _) = controller(CardState::Collapsed);

    c.begin_interactive(0.9);
    c.update(0.3);
    c.begin_interactive(0.9);
    assert!(approx(c.paused_fraction(), 0.3));

    // 以新捕获的进度为基准继续拖动
    c.update(0.2);
    assert!(approx(c.fraction_complete().unwrap(), 0.5));
}

#[test]
fn test_paused_run_does_not_advance() {
    let (mut c, visuals) = controller(CardState::Collapsed);
    c.begin_interactive(0.9);
    c.update(0.25);
    let frozen = visuals.snapshot();

    c.tick(5.0);
    assert!(c.is_transitioning());
    assert_eq!(visuals.snapshot(), frozen);
}

#[test]
fn test_zero_displacement_drag_is_noop() {
    let (mut c, visuals) = controller(CardState::Collapsed);

    c.begin_interactive(0.9);
    c.update(0.0);
    c.end_interactive();

    assert!(!c.is_transitioning());
    assert_eq!(c.current_state(), CardState::Collapsed);
    assert_eq!(visuals.snapshot().offset_y, 779.0);
    assert_eq!(
        c.drain_events().last(),
        Some(&TransitionEvent::Cancelled {
            state: CardState::Collapsed,
        })
    );

    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Collapsed);
}

#[test]
fn test_drag_scrubs_then_resumes_with_remaining_duration() {
    let (mut c, visuals) = controller(CardState::Collapsed);

    c.begin_interactive(0.9);
    c.update(0.5);
    assert!(approx(c.fraction_complete().unwrap(), 0.5));
    let snap = visuals.snapshot();
    assert!(approx(snap.corner_radius, 6.0));
    assert!(approx(snap.overlay_blur, 0.5));
    assert!(snap.offset_y < 779.0 && snap.offset_y > 244.0);

    c.end_interactive();
    assert!(!c.is_interactive());

    // 剩余 0.45s
    c.tick(0.3);
    assert!(c.is_transitioning());
    c.tick(0.2);
    assert!(!c.is_transitioning());
    assert_eq!(c.current_state(), CardState::Expanded);
}

#[test]
fn test_regrab_running_toggle() {
    let (mut c, _) = controller(CardState::Collapsed);

    c.toggle(1.0);
    c.tick(0.4);
    c.begin_interactive(1.0);
    assert!(approx(c.paused_fraction(), 0.4));
    assert_eq!(
        c.phase(),
        ControllerPhase::Transitioning {
            target: CardState::Expanded,
            interactive: true,
        }
    );

    c.update(0.2);
    assert!(approx(c.fraction_complete().unwrap(), 0.6));

    c.end_interactive();
    c.tick(0.5);
    assert_eq!(c.current_state(), CardState::Expanded);
}

#[test]
fn test_regrab_without_movement_still_completes() {
    let (mut c, _) = controller(CardState::Collapsed);

    c.toggle(1.0);
    c.tick(0.4);
    c.begin_interactive(1.0);
    c.end_interactive();
    assert!(c.is_transitioning());

    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Expanded);
}

#[test]
fn test_update_and_end_without_run_are_ignored() {
    let (mut c, visuals) = controller(CardState::Collapsed);
    let before = visuals.snapshot();

    c.update(0.5);
    c.end_interactive();
    c.tick(FRAME);

    assert_eq!(c.phase(), ControllerPhase::Idle { state: CardState::Collapsed });
    assert_eq!(visuals.snapshot(), before);
    assert!(c.drain_events().is_empty());
}

#[test]
fn test_overshoot_is_clamped() {
    let (mut c, visuals) = controller(CardState::Collapsed);

    c.begin_interactive(0.9);
    c.update(7.0);
    assert_eq!(c.fraction_complete(), Some(1.0));
    assert_eq!(visuals.snapshot().offset_y, 244.0);

    c.update(-7.0);
    assert_eq!(c.fraction_complete(), Some(0.0));
    assert_eq!(visuals.snapshot().offset_y, 779.0);

    c.update(f32::NAN);
    assert_eq!(c.fraction_complete(), Some(0.0));
}

#[test]
fn test_expanded_then_drag_back_scenario() {
    let (mut c, _) = controller(CardState::Collapsed);

    c.toggle(0.9);
    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Expanded);

    c.begin_interactive(0.9);
    c.update(0.5);
    c.end_interactive();
    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Collapsed);
}

#[test]
fn test_interactive_event_sequence() {
    let (mut c, _) = controller(CardState::Collapsed);

    c.begin_interactive(1.0);
    c.update(0.5);
    c.end_interactive();
    settle(&mut c);

    let log = c
        .drain_events()
        .iter()
        .map(|e| format!("{e:?}"))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(log, @r"
Started { target: Expanded, interactive: true }
Paused { fraction: 0.0 }
Resumed { fraction: 0.5 }
Completed { state: Expanded }
");
}

// -------------------------------------------------------------------------
// 进度映射
// -------------------------------------------------------------------------

#[test]
fn test_effective_fraction_mapping() {
    assert_eq!(effective_fraction(CardState::Collapsed, 0.0, 0.3), 0.3);
    assert_eq!(effective_fraction(CardState::Expanded, 0.0, 0.3), 0.0);
    assert_eq!(effective_fraction(CardState::Expanded, 0.0, -0.3), 0.3);
    assert_eq!(effective_fraction(CardState::Collapsed, 0.8, 0.5), 1.0);
    assert_eq!(effective_fraction(CardState::Collapsed, 0.2, -0.9), 0.0);
    assert!(approx(effective_fraction(CardState::Expanded, 0.2, -0.5), 0.7));
    assert_eq!(effective_fraction(CardState::Collapsed, 0.4, f32::INFINITY), 0.4);
}

// -------------------------------------------------------------------------
// 手势分发
// -------------------------------------------------------------------------

#[test]
fn test_gesture_drag_up_expands() {
    let (mut c, _) = controller(CardState::Collapsed);

    c.handle_gesture(&GestureEvent::Began);
    c.handle_gesture(&GestureEvent::changed(3.0, -267.5));
    assert!(approx(c.fraction_complete().unwrap(), 0.5));

    c.handle_gesture(&GestureEvent::Ended);
    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Expanded);
}

#[test]
fn test_gesture_drag_down_collapses() {
    let (mut c, _) = controller(CardState::Expanded);

    c.handle_gesture(&GestureEvent::Began);
    c.handle_gesture(&GestureEvent::changed(0.0, 267.5));
    assert!(approx(c.fraction_complete().unwrap(), 0.5));

    // 取消与结束同样提交到终态
    c.handle_gesture(&GestureEvent::Cancelled);
    settle(&mut c);
    assert_eq!(c.current_state(), CardState::Collapsed);
}

#[test]
fn test_gesture_tap_during_drag_is_ignored() {
    let (mut c, starts) = counting_controller();

    c.handle_gesture(&GestureEvent::Began);
    c.handle_gesture(&GestureEvent::Tap);
    assert_eq!(starts.get(), 3);
    assert!(c.is_interactive());
}

#[test]
fn test_gesture_tap_uses_default_duration() {
    let (c, _) = controller(CardState::Collapsed);
    let mut c = c.with_default_duration(0.5).unwrap();

    c.handle_gesture(&GestureEvent::Tap);
    c.tick(0.49);
    assert!(c.is_transitioning());
    c.tick(0.02);
    assert_eq!(c.current_state(), CardState::Expanded);
}
