//! Table region detection from text alignment (stream mode).
//!
//! Resumes rarely draw ruling lines, so tables are located purely from
//! spans whose left edges line up in columns across consecutive rows. Only
//! the region is reported; cell contents stay in the regular line output.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::model::Rect;

use super::layout::TextSpan;

/// X positions within this distance share a column bucket.
const BUCKET_SIZE: f32 = 5.0;
/// Alignment tolerance between a span edge and a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// A table region found on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    /// Region bounding box (top-left origin)
    pub bbox: Rect,
    /// Column left edges
    pub columns: Vec<f32>,
    /// Number of rows in the region
    pub rows: usize,
}

/// Row of spans sharing a baseline.
#[derive(Debug, Clone)]
struct SpanRow<'a> {
    spans: Vec<&'a TextSpan>,
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// Finds table regions in a page's spans.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Locate table regions, top to bottom.
    pub fn find_tables(&self, spans: &[TextSpan]) -> Vec<TableRegion> {
        log::trace!("table scan over {} spans", spans.len());

        let cells: Vec<&TextSpan> = spans.iter().filter(|s| !s.is_blank()).collect();
        if cells.len() < self.config.min_rows * self.config.min_columns {
            return vec![];
        }

        let rows = self.group_into_rows(cells);
        if rows.len() < self.config.min_rows {
            return vec![];
        }

        let columns = self.detect_columns(&rows);
        if columns.len() < self.config.min_columns {
            log::trace!("only {} aligned columns", columns.len());
            return vec![];
        }

        let mut regions = Vec::new();
        for (start, end) in self.find_table_regions(&rows, &columns) {
            let table_rows = &rows[start..=end];

            let table_columns = self.detect_columns(table_rows);
            if table_columns.len() < self.config.min_columns {
                continue;
            }
            if table_columns.len() > self.config.max_columns {
                log::debug!(
                    "skipping region with {} columns (max {})",
                    table_columns.len(),
                    self.config.max_columns
                );
                continue;
            }
            if self.is_list_pattern(table_rows, &table_columns) {
                log::debug!("skipping region that reads as a list");
                continue;
            }

            let Some(bbox) =
                Rect::union_all(table_rows.iter().flat_map(|r| r.spans.iter().map(|s| &s.bbox)))
            else {
                continue;
            };
            regions.push(TableRegion {
                bbox,
                columns: table_columns,
                rows: table_rows.len(),
            });
        }

        regions
    }

    /// Group spans into rows by baseline, top to bottom.
    fn group_into_rows<'a>(&self, mut sorted: Vec<&'a TextSpan>) -> Vec<SpanRow<'a>> {
        sorted.sort_by(|a, b| {
            a.baseline()
                .partial_cmp(&b.baseline())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.bbox.left.partial_cmp(&b.bbox.left).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut rows: Vec<SpanRow<'a>> = Vec::new();
        let mut current: Vec<&TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.size * self.config.y_tolerance_factor;
            match current_y {
                Some(y) if (span.baseline() - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(SpanRow {
                            spans: std::mem::take(&mut current),
                        });
                    }
                    current_y = Some(span.baseline());
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            rows.push(SpanRow { spans: current });
        }

        rows
    }

    /// Column edges: left-edge buckets shared by enough rows.
    ///
    /// Rows with two or more spans are preferred; when too few exist every
    /// span edge is counted instead.
    fn detect_columns(&self, rows: &[SpanRow<'_>]) -> Vec<f32> {
        let multi_span_rows: Vec<&SpanRow<'_>> = rows.iter().filter(|r| r.spans.len() >= 2).collect();

        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        let considered = if multi_span_rows.len() >= self.config.min_rows {
            for row in &multi_span_rows {
                let buckets: HashSet<i32> = row.spans.iter().map(|s| bucket_of(s.bbox.left)).collect();
                for bucket in buckets {
                    *edge_counts.entry(bucket).or_insert(0) += 1;
                }
            }
            multi_span_rows.len()
        } else {
            for span in rows.iter().flat_map(|r| r.spans.iter()) {
                *edge_counts.entry(bucket_of(span.bbox.left)).or_insert(0) += 1;
            }
            rows.len()
        };

        let min_occurrences = ((considered as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .iter()
            .filter(|(_, count)| **count >= min_occurrences)
            .map(|(bucket, _)| *bucket as f32 * BUCKET_SIZE)
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Runs of consecutive aligned rows at least `min_rows` long.
    fn find_table_regions(&self, rows: &[SpanRow<'_>], columns: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if alignment_score(row, columns) >= self.config.min_alignment_ratio {
                start.get_or_insert(i);
            } else if let Some(s) = start.take() {
                if i - s >= self.config.min_rows {
                    regions.push((s, i - 1));
                }
            }
        }
        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push((s, rows.len() - 1));
            }
        }

        regions
    }

    /// Whether the "table" is really a bulleted or numbered list whose
    /// markers were emitted as separate spans.
    fn is_list_pattern(&self, rows: &[SpanRow<'_>], columns: &[f32]) -> bool {
        if columns.len() < 2 || rows.is_empty() {
            return false;
        }

        let mut bullet_count = 0;
        let mut number_count = 0;
        for row in rows {
            let first = row.spans.iter().min_by(|a, b| {
                a.bbox
                    .left
                    .partial_cmp(&b.bbox.left)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(span) = first {
                let text = span.text.trim();
                if is_bullet_marker(text) {
                    bullet_count += 1;
                } else if is_number_marker(text) {
                    number_count += 1;
                }
            }
        }

        let bullet_ratio = bullet_count as f32 / rows.len() as f32;
        let total_ratio = (bullet_count + number_count) as f32 / rows.len() as f32;

        // Numbered first columns do occur in real 3+ column tables.
        bullet_ratio >= 0.5 || (columns.len() == 2 && total_ratio >= 0.5)
    }
}

fn bucket_of(x: f32) -> i32 {
    (x / BUCKET_SIZE).round() as i32
}

/// Fraction of a row's spans that start on a column edge.
fn alignment_score(row: &SpanRow<'_>, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|s| columns.iter().any(|c| (s.bbox.left - c).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

/// Check if text is a bullet marker (•, -, etc.).
fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "◇" | "▶" | "➤"
    )
}

/// Check if text is a number-style list marker (1., 2), a., etc.).
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.trim().chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (digits, suffix) = cleaned.split_at(pos);
        if !digits.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }
    if cleaned.parse::<u32>().is_ok() {
        return true;
    }

    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}
