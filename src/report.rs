use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use anyhow::Result;

use crate::config::{ReportConfig, ReportFormat};
use crate::models::ScanReport;
use crate::utils::format_percent;

/// JSON 报告结构
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub root: String,
    pub bytes_read: u64,
    pub total_bits: u64,
    pub one_bits: u64,
    pub zero_bits: u64,
    pub one_percent: f64,
    pub zero_percent: f64,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub errors: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_ms: Option<u128>,
}

impl From<&ScanReport> for JsonReport {
    fn from(report: &ScanReport) -> Self {
        let tally = report.tally;
        Self {
            root: report.root.display().to_string(),
            bytes_read: tally.bytes_read,
            total_bits: tally.total_bits(),
            one_bits: tally.one_bits,
            zero_bits: tally.zero_bits(),
            one_percent: tally.one_percent(),
            zero_percent: tally.zero_percent(),
            files_scanned: report.files_scanned,
            files_failed: report.files_failed,
            errors: report.error_messages(),
            started_at: report.scan_start_time,
            finished_at: report.scan_end_time,
            duration_ms: report.scan_duration().map(|d| d.as_millis()),
        }
    }
}

/// 文本报告：错误数、逐条错误、比特汇总
pub fn render_text(report: &ScanReport, config: &ReportConfig) -> String {
    let tally = report.tally;
    let precision = config.precision;

    let mut out = format!(
        "{} errors\n{}\n",
        report.errors.len(),
        report.error_messages().join("\n")
    );
    out.push_str(&format!(
        "total bits in input: {}. {} ({}%) ones, {} ({}%) zeroes.\n",
        tally.total_bits(),
        tally.one_bits,
        format_percent(tally.one_percent(), precision),
        tally.zero_bits(),
        format_percent(tally.zero_percent(), precision),
    ));

    if config.show_duration {
        out.push_str(&format!(
            "scanned {} files in {}\n",
            report.files_scanned + report.files_failed,
            report.scan_duration_display()
        ));
    }

    out
}

pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from(report))?)
}

/// 按配置的格式输出报告
pub fn write_report<W: Write>(out: &mut W, report: &ScanReport, config: &ReportConfig) -> Result<()> {
    match config.format {
        ReportFormat::Text => out.write_all(render_text(report, config).as_bytes())?,
        ReportFormat::Json => writeln!(out, "{}", render_json(report)?)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BitTally, ScanError};
    use std::path::PathBuf;

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new(PathBuf::from("data"));
        report.tally = BitTally {
            bytes_read: 8,
            one_bits: 33,
        };
        report.files_scanned = 4;
        report.finish_scan();
        report
    }

    #[test]
    fn test_text_report_without_errors() {
        let text = render_text(&sample_report(), &ReportConfig::default());
        assert_eq!(
            text,
            "0 errors\n\ntotal bits in input: 64. 33 (51.56%) ones, 31 (48.44%) zeroes.\n"
        );
    }

    #[test]
    fn test_text_report_lists_errors() {
        let mut report = sample_report();
        report.errors.push(ScanError::MissingEntry {
            path: PathBuf::from("data/x"),
        });
        report.errors.push(ScanError::MissingEntry {
            path: PathBuf::from("data/y"),
        });

        let text = render_text(&report, &ReportConfig::default());
        assert!(text.starts_with("2 errors\nnil entry: data/x\nnil entry: data/y\n"));
    }

    #[test]
    fn test_empty_scan_has_no_nan() {
        let mut report = ScanReport::new(PathBuf::from("empty"));
        report.finish_scan();
        let text = render_text(&report, &ReportConfig::default());
        assert!(text.contains("total bits in input: 0. 0 (0.00%) ones, 0 (0.00%) zeroes."));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_precision_and_duration_settings() {
        let config = ReportConfig {
            precision: 0,
            show_duration: true,
            ..ReportConfig::default()
        };
        let text = render_text(&sample_report(), &config);
        assert!(text.contains("33 (52%) ones, 31 (48%) zeroes."));
        assert!(text.contains("scanned 4 files in "));
    }

    #[test]
    fn test_json_report_fields() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["root"], "data");
        assert_eq!(value["bytes_read"], 8);
        assert_eq!(value["total_bits"], 64);
        assert_eq!(value["one_bits"], 33);
        assert_eq!(value["zero_bits"], 31);
        assert_eq!(value["errors"].as_array().unwrap().len(), 0);
        assert!(value["duration_ms"].is_u64());
    }

    #[test]
    fn test_write_report_uses_configured_format() {
        let mut buf = Vec::new();
        let config = ReportConfig {
            format: ReportFormat::Json,
            ..ReportConfig::default()
        };
        write_report(&mut buf, &sample_report(), &config).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.trim_start().starts_with('{'));
    }
}
