use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::{BitTally, ScanError};

/// 一次扫描的结果：统计总数与错误日志分开保存
#[derive(Debug)]
pub struct ScanReport {
    /// 扫描的根路径
    pub root: PathBuf,

    /// 累计统计
    pub tally: BitTally,

    /// 按发生顺序记录的错误
    pub errors: Vec<ScanError>,

    /// 完整读完的文件数
    pub files_scanned: usize,

    /// 读取失败（打开失败或中途失败）的文件数
    pub files_failed: usize,

    /// 扫描开始时间
    pub scan_start_time: DateTime<Utc>,

    /// 扫描结束时间
    pub scan_end_time: Option<DateTime<Utc>>,
}

impl ScanReport {
    /// 创建新的扫描结果
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            tally: BitTally::default(),
            errors: Vec::new(),
            files_scanned: 0,
            files_failed: 0,
            scan_start_time: Utc::now(),
            scan_end_time: None,
        }
    }

    /// 完成扫描
    pub fn finish_scan(&mut self) {
        self.scan_end_time = Some(Utc::now());
    }

    /// 扫描耗时
    pub fn scan_duration(&self) -> Option<Duration> {
        self.scan_end_time.map(|end| {
            end.signed_duration_since(self.scan_start_time)
                .to_std()
                .unwrap_or_default()
        })
    }

    /// 扫描耗时的友好显示
    pub fn scan_duration_display(&self) -> String {
        match self.scan_duration() {
            Some(duration) => crate::utils::format_duration(duration),
            None => "进行中...".to_string(),
        }
    }

    /// 错误信息文本列表
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
