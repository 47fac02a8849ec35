use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// 逐行输出进度：每个普通文件一行路径
///
/// 输出端关闭（例如管道另一端已退出）后不再写入，扫描照常进行。
pub struct ProgressLines<W: Write> {
    out: W,
    closed: bool,
}

impl ProgressLines<io::Stdout> {
    /// 输出到标准输出
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl ProgressLines<io::Stderr> {
    /// 输出到标准错误，标准输出留给机器可读的报告
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ProgressLines<W> {
    pub fn new(out: W) -> Self {
        Self { out, closed: false }
    }

    /// 输出一行路径
    pub fn report(&mut self, path: &Path) {
        if self.closed {
            return;
        }

        if let Err(err) = writeln!(self.out, "{}", path.display()) {
            if err.kind() != ErrorKind::BrokenPipe {
                tracing::warn!("无法输出进度，停止输出: {}", err);
            }
            self.closed = true;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
