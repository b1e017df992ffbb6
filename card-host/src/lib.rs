//! # Host 层
//!
//! 卡片交互的无界面宿主实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载
//! - 指针输入 → 手势识别
//! - 帧循环（固定帧率）
//! - 记录表面状态，输出回放轨迹
//!
//! Host 层不包含过渡逻辑，状态机全部在 `card-runtime` 中。

pub mod config;
pub mod input;
pub mod scenario;
pub mod simulator;

pub use config::{AppConfig, ConfigError, GestureConfig, SimulationConfig, TransitionConfig};
pub use input::{GestureRecognizer, PointerEvent};
pub use scenario::{Scenario, ScenarioError, ScheduledPointer};
pub use simulator::{FrameSample, ReportedEvent, SimulationReport, Simulator};
