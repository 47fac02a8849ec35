use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::{FileStreamOutcome, ScanError, ScanReport};
use crate::scanner::{BitAccumulator, ProgressLines};

/// 目录条目的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl From<std::fs::FileType> for EntryKind {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        }
    }
}

/// 遍历器产出的事件
#[derive(Debug)]
pub enum WalkEvent {
    /// 正常的目录条目
    Entry { path: PathBuf, kind: EntryKind },

    /// 条目缺少描述信息
    Missing { path: PathBuf },

    /// 无法产出该条目
    Failed { path: PathBuf, error: io::Error },
}

/// 目录遍历接口
pub trait TreeWalker {
    /// 遍历 `root` 下的所有条目，每个普通文件恰好出现一次
    fn walk<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = WalkEvent> + 'a>;
}

/// 打开文件字节流的接口
pub trait StreamOpener {
    type Stream: Read;

    fn open(&self, path: &Path) -> io::Result<Self::Stream>;
}

/// 基于 walkdir 的遍历器，按文件名排序保证相同目录树的遍历顺序一致
#[derive(Debug, Clone, Default)]
pub struct WalkdirTree {
    max_depth: Option<usize>,
}

impl WalkdirTree {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }
}

impl TreeWalker for WalkdirTree {
    fn walk<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = WalkEvent> + 'a> {
        let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let root = root.to_path_buf();
        Box::new(walker.into_iter().map(move |entry| match entry {
            Ok(entry) => WalkEvent::Entry {
                kind: entry.file_type().into(),
                path: entry.into_path(),
            },
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                let error = match err.into_io_error() {
                    Some(io_err) => io_err,
                    // walkdir 只在检测到符号链接循环时不带 io::Error
                    None => io::Error::other("file system loop detected"),
                };
                WalkEvent::Failed { path, error }
            }
        }))
    }
}

/// 用标准库打开文件
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl StreamOpener for FsOpener {
    type Stream = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

/// 文件扫描器 - 遍历目录树，把每个普通文件交给累加器
pub struct Scanner<W = WalkdirTree, O = FsOpener> {
    walker: W,
    opener: O,
    buffer_size: usize,
}

impl Scanner {
    /// 按配置创建扫描器
    pub fn new(config: &Config) -> Self {
        Self {
            walker: WalkdirTree::new(config.scan.max_depth),
            opener: FsOpener,
            buffer_size: config.scan.buffer_size,
        }
    }
}

impl<W: TreeWalker, O: StreamOpener> Scanner<W, O> {
    /// 使用自定义的遍历器和打开器
    pub fn with_collaborators(walker: W, opener: O, buffer_size: usize) -> Self {
        Self {
            walker,
            opener,
            buffer_size,
        }
    }

    /// 扫描根路径并生成报告，每个文件在标准输出打印一行路径
    pub fn run(&self, root: &Path) -> Result<ScanReport, ScanError> {
        let mut progress = ProgressLines::stdout();
        self.run_with_progress(root, |path| progress.report(path))
    }

    /// 与 `run` 相同，但进度通过回调报告
    pub fn run_with_progress<F>(&self, root: &Path, progress: F) -> Result<ScanReport, ScanError>
    where
        F: FnMut(&Path),
    {
        let mut report = ScanReport::new(root.to_path_buf());
        let mut accumulator = BitAccumulator::new(self.buffer_size);

        tracing::info!(
            "开始扫描 {} (缓冲区 {} 字节)",
            root.display(),
            accumulator.capacity()
        );
        self.scan_with_progress(root, &mut accumulator, progress)?;

        report.files_scanned = accumulator.files_consumed();
        report.files_failed = accumulator.files_failed();
        let (tally, errors) = accumulator.into_parts();
        report.tally = tally;
        report.errors = errors;
        report.finish_scan();

        tracing::info!(
            "扫描完成: {} 个文件, {} 字节, {} 个错误, 耗时 {}",
            report.files_scanned + report.files_failed,
            report.tally.bytes_read,
            report.errors.len(),
            report.scan_duration_display()
        );
        Ok(report)
    }

    /// 扫描根路径，统计并入 `accumulator`
    pub fn scan(&self, root: &Path, accumulator: &mut BitAccumulator) -> Result<(), ScanError> {
        let mut progress = ProgressLines::stdout();
        self.scan_with_progress(root, accumulator, |path| progress.report(path))
    }

    /// 扫描根路径；只有根路径无法开始遍历时才返回错误
    pub fn scan_with_progress<F>(
        &self,
        root: &Path,
        accumulator: &mut BitAccumulator,
        mut progress: F,
    ) -> Result<(), ScanError>
    where
        F: FnMut(&Path),
    {
        if root.as_os_str().is_empty() {
            return Err(ScanError::FatalInit {
                path: root.to_path_buf(),
                reason: "root path is empty".to_string(),
            });
        }

        for event in self.walker.walk(root) {
            match event {
                WalkEvent::Failed { path, error } => {
                    accumulator.record_error(ScanError::Walk {
                        path,
                        source: error,
                    });
                }
                WalkEvent::Missing { path } => {
                    accumulator.record_error(ScanError::MissingEntry { path });
                }
                WalkEvent::Entry {
                    path,
                    kind: EntryKind::File,
                } => {
                    progress(&path);
                    if let Some(outcome) = self.consume_file(&path, accumulator) {
                        let contribution = outcome.contribution();
                        tracing::debug!(
                            "{}: {} 字节, {} 个 1 比特{}",
                            path.display(),
                            contribution.bytes_read,
                            contribution.one_bits,
                            if outcome.is_consumed() { "" } else { " (部分)" }
                        );
                    }
                }
                WalkEvent::Entry { .. } => {}
            }
        }

        Ok(())
    }

    /// 打开并读取单个文件，流在离开作用域时关闭；打开失败时返回 `None`
    fn consume_file(
        &self,
        path: &Path,
        accumulator: &mut BitAccumulator,
    ) -> Option<FileStreamOutcome> {
        match self.opener.open(path) {
            Ok(stream) => Some(accumulator.consume_stream(path, stream)),
            Err(err) => {
                accumulator.record_error(ScanError::Open {
                    path: path.to_path_buf(),
                    source: err,
                });
                None
            }
        }
    }
}
