//! 卡片交互模拟器
//!
//! 加载配置与场景，以固定帧率回放并输出摘要，可选导出逐帧轨迹。

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use card_host::{AppConfig, Scenario, Simulator};
use card_runtime::CardState;
use clap::Parser;
use tracing::{Level, info};

/// 命令行参数（优先级高于配置文件）
#[derive(Debug, Parser)]
#[command(name = "card-host", about = "底部卡片交互的无界面回放")]
struct Cli {
    /// 场景文件
    scenario: PathBuf,

    /// 配置文件
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 覆盖帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 覆盖过渡时长（秒）
    #[arg(long)]
    duration: Option<f32>,

    /// 覆盖初始状态
    #[arg(long, value_parser = parse_state)]
    initial_state: Option<CardState>,

    /// 逐帧轨迹输出路径（JSON）
    #[arg(long)]
    trace: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn parse_state(s: &str) -> Result<CardState, String> {
    match s.to_ascii_lowercase().as_str() {
        "expanded" => Ok(CardState::Expanded),
        "collapsed" => Ok(CardState::Collapsed),
        other => Err(format!("未知状态 '{other}'，可选 expanded / collapsed")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    let mut config = AppConfig::load(&cli.config);
    if let Some(fps) = cli.fps {
        config.simulation.fps = fps;
    }
    if let Some(duration) = cli.duration {
        config.transition.duration = duration;
    }
    if let Some(state) = cli.initial_state {
        config.transition.initial_state = state;
    }
    config.validate().context("配置无效")?;

    let mut scenario = Scenario::load(&cli.scenario)
        .with_context(|| format!("无法加载场景 {:?}", cli.scenario))?;
    if cli.initial_state.is_some() {
        scenario.initial_state = None;
    }

    let report = Simulator::new(config).run(&scenario)?;
    println!("{}", report.summary());

    if let Some(path) = &cli.trace {
        let file = File::create(path).with_context(|| format!("无法创建轨迹文件 {path:?}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
        info!(path = ?path, frames = report.samples.len(), "轨迹已导出");
    }

    if !report.settled {
        anyhow::bail!("场景 '{}' 在超时前没有回到空闲", report.scenario);
    }
    Ok(())
}
