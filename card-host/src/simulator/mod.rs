//! # Simulator 模块
//!
//! 无界面宿主：以固定帧率回放场景，驱动控制器并记录每帧的视觉状态。
//!
//! ## 每帧流程
//!
//! 1. 到期的指针事件经识别器转换为手势，放入串行队列
//! 2. 按顺序把队列中的手势交给控制器
//! 3. `tick(dt)` 推进动画
//! 4. 取出控制器事件并记录采样
//!
//! 所有控制器调用都发生在这一个循环里，队列就是唯一的串行入口。

use std::collections::VecDeque;
use std::rc::Rc;

use card_runtime::{
    CardGeometry, CardProperty, CardState, CardSurface, CardVisuals, ControllerPhase,
    GestureEvent, TransitionController, TransitionEvent, VisualSnapshot,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::input::GestureRecognizer;
use crate::scenario::Scenario;

/// 事件时间容差（秒），吸收帧时间的浮点误差
const TIME_EPSILON: f32 = 1e-4;

/// 单帧采样
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    pub frame: u32,
    pub time: f32,
    pub state: CardState,
    pub phase: ControllerPhase,
    #[serde(flatten)]
    pub visuals: VisualSnapshot,
}

/// 带帧号的控制器事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedEvent {
    pub frame: u32,
    #[serde(flatten)]
    pub event: TransitionEvent,
}

/// 回放结果
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub scenario: String,
    pub initial_state: CardState,
    pub final_state: CardState,
    /// 回放是否在超时前回到空闲
    pub settled: bool,
    pub gestures: Vec<GestureEvent>,
    pub events: Vec<ReportedEvent>,
    pub samples: Vec<FrameSample>,
}

impl SimulationReport {
    pub fn count(&self, matches: impl Fn(&TransitionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(&e.event)).count()
    }

    pub fn completed(&self) -> usize {
        self.count(|e| matches!(e, TransitionEvent::Completed { .. }))
    }

    pub fn cancelled(&self) -> usize {
        self.count(|e| matches!(e, TransitionEvent::Cancelled { .. }))
    }

    /// 一行摘要
    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {}，{} 帧，{} 次完成，{} 次撤销{}",
            self.scenario,
            self.initial_state,
            self.final_state,
            self.samples.len(),
            self.completed(),
            self.cancelled(),
            if self.settled { "" } else { "（未稳定）" }
        )
    }
}

/// 无界面模拟器
pub struct Simulator {
    config: AppConfig,
}

impl Simulator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 回放一个场景
    pub fn run(&self, scenario: &Scenario) -> anyhow::Result<SimulationReport> {
        scenario.validate()?;

        let geometry: &CardGeometry = &self.config.card;
        let initial_state = scenario
            .initial_state
            .unwrap_or(self.config.transition.initial_state);

        let visuals = Rc::new(CardVisuals::default());
        let mut controller = TransitionController::new(geometry, initial_state, visuals.clone())?
            .with_default_duration(self.config.transition.duration)?;
        let mut recognizer = GestureRecognizer::new(self.config.gesture.touch_slop);
        let mut queue: VecDeque<GestureEvent> = VecDeque::new();

        let dt = self.config.frame_dt();
        let deadline = scenario.end_time() + self.config.simulation.settle_timeout;

        let mut report = SimulationReport {
            scenario: scenario.name.clone(),
            initial_state,
            final_state: initial_state,
            settled: false,
            gestures: Vec::new(),
            events: Vec::new(),
            samples: Vec::new(),
        };

        info!(scenario = %scenario.name, state = %initial_state, "开始回放");

        let mut pending = scenario.events.iter().peekable();
        let mut frame: u32 = 0;

        loop {
            let time = frame as f32 * dt;

            while let Some(scheduled) = pending.next_if(|e| e.at <= time + TIME_EPSILON) {
                let area = geometry.handle_area(visuals.get_property(CardProperty::OffsetY));
                queue.extend(recognizer.handle(&scheduled.pointer, area));
            }

            while let Some(gesture) = queue.pop_front() {
                debug!(frame, gesture = ?gesture, "分发手势");
                controller.handle_gesture(&gesture);
                report.gestures.push(gesture);
            }

            controller.tick(dt);

            for event in controller.drain_events() {
                log_event(frame, &event);
                report.events.push(ReportedEvent { frame, event });
            }

            report.samples.push(FrameSample {
                frame,
                time,
                state: controller.current_state(),
                phase: controller.phase(),
                visuals: visuals.snapshot(),
            });

            frame += 1;

            let inputs_done = pending.peek().is_none() && !recognizer.is_panning();
            if inputs_done && !controller.is_transitioning() {
                report.settled = true;
                break;
            }
            if time > deadline {
                warn!(
                    scenario = %scenario.name,
                    deadline,
                    "回放超时，过渡仍未结束"
                );
                break;
            }
        }

        report.final_state = controller.current_state();
        info!(summary = %report.summary(), "回放结束");
        Ok(report)
    }
}

fn log_event(frame: u32, event: &TransitionEvent) {
    match event {
        TransitionEvent::Started {
            target,
            interactive,
        } => debug!(frame, target = %target, interactive, "过渡开始"),
        TransitionEvent::Paused { fraction } => debug!(frame, fraction, "过渡冻结"),
        TransitionEvent::Resumed { fraction } => debug!(frame, fraction, "过渡继续"),
        TransitionEvent::Completed { state } => info!(frame, state = %state, "过渡完成"),
        TransitionEvent::Cancelled { state } => info!(frame, state = %state, "零位移拖拽，过渡撤销"),
    }
}
