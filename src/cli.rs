use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bit_counter_cli::config::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "bit-counter-cli")]
#[command(about = "统计目录树中所有文件的 1 比特与 0 比特数量")]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 要扫描的根目录 (默认为当前目录)
    pub root: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// 读缓冲区大小（字节）
    #[arg(short, long)]
    pub buffer_size: Option<usize>,

    /// 最大扫描深度
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 管理配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// 显示当前配置
    Show,

    /// 重置为默认配置
    Reset,

    /// 显示配置文件路径
    Path,
}
