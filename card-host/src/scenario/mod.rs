//! # Scenario 模块
//!
//! 按时间排列的指针输入脚本，供无界面模拟器回放。
//!
//! ```json
//! {
//!   "name": "drag_expand",
//!   "initial_state": "collapsed",
//!   "events": [
//!     { "at": 0.0, "pointer": { "type": "down", "x": 195, "y": 810 } },
//!     { "at": 0.1, "pointer": { "type": "move", "x": 195, "y": 600 } },
//!     { "at": 0.2, "pointer": { "type": "up" } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use card_runtime::CardState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::PointerEvent;

/// 带时间戳的指针事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPointer {
    /// 触发时间（秒，自场景开始）
    pub at: f32,
    pub pointer: PointerEvent,
}

/// 输入场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,

    /// 覆盖配置中的初始状态
    #[serde(default)]
    pub initial_state: Option<CardState>,

    #[serde(default)]
    pub events: Vec<ScheduledPointer>,
}

/// 场景错误
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("场景文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("场景解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("第 {index} 个事件的时间 {at} 无效")]
    InvalidTime { index: usize, at: f32 },

    #[error("第 {index} 个事件早于前一个事件（{at} < {previous}）")]
    Unsorted { index: usize, at: f32, previous: f32 },
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_state: None,
            events: Vec::new(),
        }
    }

    /// 追加一个事件（构造测试场景用）
    pub fn at(mut self, at: f32, pointer: PointerEvent) -> Self {
        self.events.push(ScheduledPointer { at, pointer });
        self
    }

    pub fn with_initial_state(mut self, state: CardState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// 从 JSON 文本解析并验证
    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// 从文件加载并验证
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// 时间必须是非负有限数，且单调不减
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut previous = 0.0_f32;
        for (index, event) in self.events.iter().enumerate() {
            if !event.at.is_finite() || event.at < 0.0 {
                return Err(ScenarioError::InvalidTime {
                    index,
                    at: event.at,
                });
            }
            if event.at < previous {
                return Err(ScenarioError::Unsorted {
                    index,
                    at: event.at,
                    previous,
                });
            }
            previous = event.at;
        }
        Ok(())
    }

    /// 最后一个事件的时间
    pub fn end_time(&self) -> f32 {
        self.events.last().map(|e| e.at).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let json = r#"{
            "name": "tap",
            "events": [
                { "at": 0.0, "pointer": { "type": "down", "x": 100, "y": 800 } },
                { "at": 0.05, "pointer": { "type": "up" } }
            ]
        }"#;
        let scenario = Scenario::parse(json).unwrap();
        assert_eq!(scenario.name, "tap");
        assert_eq!(scenario.initial_state, None);
        assert_eq!(scenario.events.len(), 2);
        assert_eq!(scenario.events[1].pointer, PointerEvent::Up);
        assert_eq!(scenario.end_time(), 0.05);
    }

    #[test]
    fn test_unsorted_rejected() {
        let scenario = Scenario::new("bad")
            .at(0.2, PointerEvent::Down { x: 0.0, y: 0.0 })
            .at(0.1, PointerEvent::Up);
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::Unsorted { index: 1, .. })
        ));
    }

    #[test]
    fn test_negative_time_rejected() {
        let scenario = Scenario::new("bad").at(-1.0, PointerEvent::Up);
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvalidTime { index: 0, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let scenario = Scenario::new("saved")
            .with_initial_state(CardState::Expanded)
            .at(0.0, PointerEvent::Down { x: 1.0, y: 2.0 });
        std::fs::write(&path, serde_json::to_string(&scenario).unwrap()).unwrap();

        assert_eq!(Scenario::load(&path).unwrap(), scenario);
        assert!(matches!(
            Scenario::load(dir.path().join("missing.json")),
            Err(ScenarioError::Io(_))
        ));
    }
}
