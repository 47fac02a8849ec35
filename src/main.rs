mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, ErrorKind};
use tracing_subscriber::EnvFilter;

use bit_counter_cli::config::{Config, ReportFormat};
use bit_counter_cli::report;
use bit_counter_cli::scanner::{ProgressLines, Scanner};
use cli::{Cli, Commands, ConfigAction};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志，输出到 stderr，stdout 留给进度与报告
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    // 配置子命令先于加载配置处理，reset 可以修复损坏的配置文件
    if let Some(Commands::Config { action }) = cli.command {
        return run_config_action(action);
    }

    // 显式指定的配置文件必须有效，默认位置的配置文件无效时退回默认值
    let mut config = match &cli.config {
        Some(config_path) => Config::load_from_file(config_path)?,
        None => Config::load_or_default(),
    };

    // 命令行参数优先于配置文件
    if let Some(format) = cli.format {
        config.report.format = format;
    }
    if let Some(buffer_size) = cli.buffer_size {
        config.scan.buffer_size = buffer_size;
    }
    if cli.max_depth.is_some() {
        config.scan.max_depth = cli.max_depth;
    }
    config.validate()?;

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("无法获取当前目录")?,
    };

    // JSON 模式下进度写到 stderr，保证 stdout 只有 JSON
    let scanner = Scanner::new(&config);
    let scan_result = match config.report.format {
        ReportFormat::Text => {
            let mut progress = ProgressLines::stdout();
            scanner.run_with_progress(&root, |path| progress.report(path))
        }
        ReportFormat::Json => {
            let mut progress = ProgressLines::stderr();
            scanner.run_with_progress(&root, |path| progress.report(path))
        }
    };
    let scan_report = scan_result.with_context(|| format!("无法扫描 {}", root.display()))?;

    let stdout = io::stdout();
    if let Err(err) = report::write_report(&mut stdout.lock(), &scan_report, &config.report) {
        let closed_pipe = err
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == ErrorKind::BrokenPipe);
        if !closed_pipe {
            return Err(err);
        }
    }

    Ok(())
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            let path = Config::default_config_path()?;
            Config::default().save_to_file(&path)?;
            println!("已重置配置: {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::default_config_path()?.display());
        }
    }
    Ok(())
}
