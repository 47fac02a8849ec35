use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 扫描过程中的错误分类
///
/// 除 `FatalInit` 外的所有错误都只记录在错误日志里，扫描继续进行。
#[derive(Debug, Error)]
pub enum ScanError {
    /// 遍历器无法产出某个条目（例如无权限进入子目录）
    #[error("walk error for {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 遍历器产出了一个没有描述信息的条目
    #[error("nil entry: {}", .path.display())]
    MissingEntry { path: PathBuf },

    /// 普通文件无法打开读取
    #[error("open error for {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 读取到一半失败，之前已统计的字节保留在总数中
    #[error("error counting file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        bytes_before_failure: u64,
        #[source]
        source: io::Error,
    },

    /// 根路径本身无法开始遍历，整次扫描失败
    #[error("cannot start traversal at {path:?}: {reason}")]
    FatalInit { path: PathBuf, reason: String },
}

impl ScanError {
    /// 出错的路径
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::Walk { path, .. }
            | ScanError::MissingEntry { path }
            | ScanError::Open { path, .. }
            | ScanError::Read { path, .. }
            | ScanError::FatalInit { path, .. } => path,
        }
    }

    /// 是否会中止整次扫描
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::FatalInit { .. })
    }
}
