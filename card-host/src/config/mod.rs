//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use card_runtime::{CardGeometry, CardState, DEFAULT_TRANSITION_DURATION};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 卡片几何参数
    #[serde(default)]
    pub card: CardGeometry,

    /// 过渡配置
    #[serde(default)]
    pub transition: TransitionConfig,

    /// 手势识别配置
    #[serde(default)]
    pub gesture: GestureConfig,

    /// 模拟器配置
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// 过渡配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// 过渡时长（秒），tap 与拖拽共用
    #[serde(default = "default_duration")]
    pub duration: f32,

    /// 启动时的卡片状态
    #[serde(default)]
    pub initial_state: CardState,
}

/// 手势识别配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// 触摸容差（逻辑像素）
    ///
    /// 按下后移动超过该距离才视为拖拽，否则松手视为点击。
    #[serde(default = "default_touch_slop")]
    pub touch_slop: f32,
}

/// 模拟器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 最后一个输入之后，等待过渡结束的最长时间（秒）
    #[serde(default = "default_settle_timeout")]
    pub settle_timeout: f32,
}

// 默认值函数
fn default_duration() -> f32 {
    DEFAULT_TRANSITION_DURATION
}

fn default_touch_slop() -> f32 {
    8.0
}

fn default_fps() -> u32 {
    60
}

fn default_settle_timeout() -> f32 {
    5.0
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            initial_state: CardState::default(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: default_touch_slop(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            settle_timeout: default_settle_timeout(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 严格读取配置文件
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 帧间隔（秒）
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.simulation.fps.max(1) as f32
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.card
            .validate()
            .map_err(|e| ConfigError::ValidationFailed(e.to_string()))?;

        if !self.transition.duration.is_finite() || self.transition.duration <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "transition.duration 必须为正数".to_string(),
            ));
        }

        if !self.gesture.touch_slop.is_finite() || self.gesture.touch_slop < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "gesture.touch_slop 不能为负数".to_string(),
            ));
        }

        if self.simulation.fps == 0 || self.simulation.fps > 1000 {
            return Err(ConfigError::ValidationFailed(
                "simulation.fps 必须在 1 - 1000 之间".to_string(),
            ));
        }

        if !self.simulation.settle_timeout.is_finite() || self.simulation.settle_timeout < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "simulation.settle_timeout 不能为负数".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 序列化 / 反序列化失败
    #[error("配置序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
