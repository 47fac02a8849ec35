use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::models::{BitTally, FileStreamOutcome, ScanError};

/// 计算单个字节中值为 1 的比特数
///
/// 每次清除最低位的 1，循环次数等于 1 的个数而不是固定 8 次。
pub fn byte_ones(mut byte: u8) -> u32 {
    let mut count = 0;
    while byte != 0 {
        byte &= byte - 1;
        count += 1;
    }
    count
}

/// 计算一段字节中值为 1 的比特总数
pub fn count_ones(bytes: &[u8]) -> u64 {
    bytes.iter().map(|&b| u64::from(byte_ones(b))).sum()
}

/// 比特累加器 - 以固定大小的缓冲区逐块读取文件，并累计比特统计
pub struct BitAccumulator {
    /// 所有文件复用的读缓冲区
    scratch: Vec<u8>,

    /// 累计统计
    tally: BitTally,

    /// 错误日志
    errors: Vec<ScanError>,

    /// 完整读完的文件数
    files_consumed: usize,

    /// 失败的文件数
    files_failed: usize,
}

impl BitAccumulator {
    /// 创建累加器，缓冲区在这里一次性分配
    pub fn new(capacity: usize) -> Self {
        Self {
            scratch: vec![0; capacity.max(1)],
            tally: BitTally::default(),
            errors: Vec::new(),
            files_consumed: 0,
            files_failed: 0,
        }
    }

    /// 缓冲区容量
    pub fn capacity(&self) -> usize {
        self.scratch.len()
    }

    /// 读完一个字节流并把统计并入总数
    ///
    /// 每个数据块读到后立即计入总数，因此中途失败的流仍保留已读部分。
    /// 读取错误不会向上传播，而是记入错误日志并返回 `Failed`。
    pub fn consume_stream<R: Read>(&mut self, path: &Path, mut stream: R) -> FileStreamOutcome {
        let mut file_tally = BitTally::default();

        loop {
            let n = match stream.read(&mut self.scratch) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    let reason = err.to_string();
                    tracing::warn!(
                        "读取 {} 时出错（已计入 {} 字节）: {}",
                        path.display(),
                        file_tally.bytes_read,
                        reason
                    );
                    self.files_failed += 1;
                    self.errors.push(ScanError::Read {
                        path: path.to_path_buf(),
                        bytes_before_failure: file_tally.bytes_read,
                        source: err,
                    });
                    return FileStreamOutcome::Failed {
                        bytes_read: file_tally.bytes_read,
                        ones: file_tally.one_bits,
                        reason,
                    };
                }
            };

            let ones = count_ones(&self.scratch[..n]);
            file_tally.add_chunk(n as u64, ones);
            self.tally.add_chunk(n as u64, ones);
        }

        self.files_consumed += 1;
        FileStreamOutcome::Consumed {
            bytes_read: file_tally.bytes_read,
            ones: file_tally.one_bits,
        }
    }

    /// 记录一个非致命错误
    pub fn record_error(&mut self, error: ScanError) {
        tracing::warn!("{}", error);
        if matches!(error, ScanError::Open { .. }) {
            self.files_failed += 1;
        }
        self.errors.push(error);
    }

    pub fn tally(&self) -> BitTally {
        self.tally
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn files_consumed(&self) -> usize {
        self.files_consumed
    }

    pub fn files_failed(&self) -> usize {
        self.files_failed
    }

    /// 取出统计总数与错误日志
    pub fn into_parts(self) -> (BitTally, Vec<ScanError>) {
        (self.tally, self.errors)
    }
}
