//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 card-runtime 覆盖率
//! - `scenario-check`: 回放场景文件，检查是否都能稳定到终态

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use card_host::{AppConfig, Scenario, Simulator};
use clap::{Parser, Subcommand};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,

    /// 运行 card-runtime 覆盖率报告
    CovRuntime,

    /// 回放场景文件
    ///
    /// 不带参数时检查 scenarios/ 下所有 .json 文件。
    ScenarioCheck {
        /// 场景文件或目录
        path: Option<PathBuf>,

        /// 宿主配置文件
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },
}

fn step(name: &str) {
    eprintln!("\n==> {name}");
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => {
            let sh = Shell::new()?;

            step("cargo fmt --all -- --check");
            cmd!(sh, "cargo fmt --all -- --check").run()?;

            step("cargo clippy --workspace --all-targets");
            cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

            step("cargo test --workspace");
            cmd!(sh, "cargo test --workspace").run()?;
        }
        Commands::CovRuntime => {
            let sh = Shell::new()?;
            if cmd!(sh, "cargo llvm-cov --version").quiet().run().is_err() {
                anyhow::bail!(
                    "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
                );
            }

            step("cargo llvm-cov -p card-runtime --html");
            cmd!(sh, "cargo llvm-cov -p card-runtime --html").run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Commands::ScenarioCheck { path, config } => {
            scenario_check(path.as_deref(), &config)?;
        }
    }

    Ok(())
}

//=============================================================================
// scenario-check 命令实现
//=============================================================================

const DEFAULT_SCENARIO_DIR: &str = "scenarios";

fn scenario_check(path: Option<&Path>, config_path: &Path) -> anyhow::Result<()> {
    let files = match path {
        Some(p) if p.is_file() => vec![p.to_path_buf()],
        Some(p) if p.is_dir() => collect_scenario_files(p),
        Some(p) => anyhow::bail!("路径不存在: {}", p.display()),
        None => {
            let dir = Path::new(DEFAULT_SCENARIO_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认场景目录不存在: {}\n请在 workspace 根目录运行，或指定场景路径",
                    dir.display()
                );
            }
            collect_scenario_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到场景文件（.json）");
        return Ok(());
    }

    let config = if config_path.exists() {
        AppConfig::read(config_path)?
    } else {
        AppConfig::default()
    };
    config.validate()?;
    let simulator = Simulator::new(config);

    eprintln!("==> 回放 {} 个场景...\n", files.len());

    let mut failures = 0;
    for file in &files {
        let outcome = Scenario::load(file)
            .map_err(anyhow::Error::from)
            .and_then(|scenario| simulator.run(&scenario));

        match outcome {
            Ok(report) if report.settled => eprintln!("[OK]    {}", report.summary()),
            Ok(report) => {
                failures += 1;
                eprintln!("[ERROR] {}", report.summary());
            }
            Err(e) => {
                failures += 1;
                eprintln!("[ERROR] {}: {e:#}", file.display());
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if failures > 0 {
        eprintln!("❌ {failures} / {} 个场景失败", files.len());
        anyhow::bail!("场景检查发现错误");
    }
    eprintln!("✅ 检查通过，{} 个场景全部稳定", files.len());
    Ok(())
}

/// 收集目录下的所有场景文件
fn collect_scenario_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}
