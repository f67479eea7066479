//! The closing "Average durations" table of a benchmark sweep.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::solver::Variant;

/// Median microseconds per board size and variant. Missing cells print `N/A`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchTable {
    rows: BTreeMap<usize, BTreeMap<Variant, f64>>,
}

impl BenchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, board_size: usize, variant: Variant, median_us: f64) {
        self.rows
            .entry(board_size)
            .or_default()
            .insert(variant, median_us);
    }

    pub fn get(&self, board_size: usize, variant: Variant) -> Option<f64> {
        self.rows.get(&board_size)?.get(&variant).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::from("Average durations (median microseconds):\nSize");
        for v in Variant::ALL {
            let _ = write!(out, ", {}", v.label());
        }
        out.push('\n');
        for (&size, cells) in &self.rows {
            let _ = write!(out, "{size}");
            for v in Variant::ALL {
                match cells.get(&v) {
                    Some(us) => {
                        let _ = write!(out, ", {us:.3}");
                    }
                    None => out.push_str(", N/A"),
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_table_fills_missing_cells() {
        let mut t = BenchTable::new();
        t.record(8, Variant::Scalar64, 12.5);
        t.record(8, Variant::Scalar256, 20.0);
        t.record(9, Variant::Simd256, 40.0);
        let text = t.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Size, 64 bits, 256 bits, AVX2, AVX2 Multi Threaded");
        assert_eq!(lines[2], "8, 12.500, 20.000, N/A, N/A");
        assert_eq!(lines[3], "9, N/A, N/A, 40.000, N/A");
    }

    #[test]
    fn test_json_uses_variant_names() {
        let mut t = BenchTable::new();
        t.record(4, Variant::Threaded256, 3.0);
        let json = t.to_json();
        assert!(json.contains("\"threaded256\""));
        assert_eq!(t.get(4, Variant::Threaded256), Some(3.0));
        assert_eq!(t.get(4, Variant::Scalar64), None);
    }
}
