use serde::{Deserialize, Serialize};

/// 累计的比特统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitTally {
    /// 已读取的字节数
    pub bytes_read: u64,

    /// 值为 1 的比特数，始终不超过 `bytes_read * 8`
    pub one_bits: u64,
}

impl BitTally {
    /// 总比特数
    pub fn total_bits(&self) -> u64 {
        self.bytes_read * 8
    }

    /// 值为 0 的比特数
    pub fn zero_bits(&self) -> u64 {
        self.total_bits() - self.one_bits
    }

    /// 1 比特占比（百分数），空输入时为 0
    pub fn one_percent(&self) -> f64 {
        percent_of(self.one_bits, self.total_bits())
    }

    /// 0 比特占比（百分数），空输入时为 0
    pub fn zero_percent(&self) -> f64 {
        percent_of(self.zero_bits(), self.total_bits())
    }

    /// 把一段数据块的统计并入总数
    pub fn add_chunk(&mut self, bytes: u64, ones: u64) {
        self.bytes_read += bytes;
        self.one_bits += ones;
    }

    /// 合并另一份统计
    pub fn merge(&mut self, other: &BitTally) {
        self.add_chunk(other.bytes_read, other.one_bits);
    }
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

/// 单个文件读取的结果，读完即并入累加器，不做保存
#[derive(Debug)]
pub enum FileStreamOutcome {
    /// 流被完整读完
    Consumed { bytes_read: u64, ones: u64 },

    /// 读取中途失败；`bytes_read`/`ones` 是失败前已计入总数的部分
    Failed {
        bytes_read: u64,
        ones: u64,
        reason: String,
    },
}

impl FileStreamOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, FileStreamOutcome::Consumed { .. })
    }

    /// 本文件贡献给总数的统计（失败时为部分统计）
    pub fn contribution(&self) -> BitTally {
        match *self {
            FileStreamOutcome::Consumed { bytes_read, ones }
            | FileStreamOutcome::Failed {
                bytes_read, ones, ..
            } => BitTally {
                bytes_read,
                one_bits: ones,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally_has_zero_percentages() {
        let tally = BitTally::default();
        assert_eq!(tally.total_bits(), 0);
        assert_eq!(tally.zero_bits(), 0);
        assert_eq!(tally.one_percent(), 0.0);
        assert_eq!(tally.zero_percent(), 0.0);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let tally = BitTally {
            bytes_read: 8,
            one_bits: 33,
        };
        assert_eq!(tally.total_bits(), 64);
        assert_eq!(tally.zero_bits(), 31);
        assert!((tally.one_percent() - 51.5625).abs() < 1e-9);
        assert!((tally.one_percent() + tally.zero_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge() {
        let mut tally = BitTally::default();
        tally.add_chunk(5, 21);
        tally.merge(&BitTally {
            bytes_read: 3,
            one_bits: 12,
        });
        assert_eq!(tally.bytes_read, 8);
        assert_eq!(tally.one_bits, 33);
    }

    #[test]
    fn test_outcome_contribution_keeps_partial_counts() {
        let failed = FileStreamOutcome::Failed {
            bytes_read: 4,
            ones: 10,
            reason: "boom".to_string(),
        };
        assert!(!failed.is_consumed());
        assert_eq!(failed.contribution().bytes_read, 4);
        assert_eq!(failed.contribution().one_bits, 10);
    }
}
