//! Trend history export.

use crate::ProjectResult;
use std::fmt::Write as _;
use std::path::Path;
use tl_sim::TrendHistory;

pub const TREND_CSV_HEADER: &str = "t_s,t1_level,t2_level,t3_level,t4_level,t3_temp_c";

/// Render the trend history as CSV, oldest sample first.
pub fn trend_csv(history: &TrendHistory) -> String {
    let mut csv = String::from(TREND_CSV_HEADER);
    csv.push('\n');
    for s in history.iter() {
        let _ = writeln!(
            csv,
            "{:.3},{:.6},{:.6},{:.6},{:.6},{:.4}",
            s.time_s, s.levels[0], s.levels[1], s.levels[2], s.levels[3], s.heated_temp_c
        );
    }
    csv
}

pub fn write_trend_csv(path: &Path, history: &TrendHistory) -> ProjectResult<()> {
    std::fs::write(path, trend_csv(history))?;
    tracing::info!(path = %path.display(), samples = history.len(), "trend exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_sim::TrendSample;

    #[test]
    fn csv_has_header_and_one_row_per_sample() {
        let mut history = TrendHistory::new(4);
        for i in 1..=6 {
            history.push(TrendSample {
                time_s: i as f64 * 0.2,
                levels: [0.8, 0.1, 0.2, 0.1],
                heated_temp_c: 20.5,
            });
        }
        let csv = trend_csv(&history);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], TREND_CSV_HEADER);
        assert_eq!(lines[1], "0.600,0.800000,0.100000,0.200000,0.100000,20.5000");
        assert!(lines[4].starts_with("1.200,"));
    }

    #[test]
    fn empty_history_is_header_only() {
        let csv = trend_csv(&TrendHistory::new(10));
        assert_eq!(csv, format!("{TREND_CSV_HEADER}\n"));
    }
}
