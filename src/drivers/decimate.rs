/// Envelope of one output pixel column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecimatedColumn {
    pub min_db: f64,
    pub max_db: f64,
}
/// Input index range `[start, end)` feeding column `x` of `width`.
///
/// Never empty: when there are fewer samples than columns, neighbouring
/// columns share indices.
pub fn bucket_bounds(x: usize, sample_count: usize, width: usize) -> (usize, usize) {
    debug_assert!(width > 0 && x < width);
    let n = sample_count as u128;
    let w = width as u128;
    let start = (x as u128 * n / w) as usize;
    let end = (((x as u128 + 1) * n / w) as usize).max(start + 1);
    (start, end)
}
/// Reduce `samples` to exactly `target_width` min/max columns.
///
/// Returns an empty vector for empty input or a zero width.
pub fn decimate_min_max(samples: &[f64], target_width: usize) -> Vec<DecimatedColumn> {
    if samples.is_empty() || target_width == 0 {
        return Vec::new();
    }
    (0..target_width)
        .map(|x| {
            let (start, end) = bucket_bounds(x, samples.len(), target_width);
            samples[start..end].iter().fold(
                DecimatedColumn {
                    min_db: f64::INFINITY,
                    max_db: f64::NEG_INFINITY,
                },
                |col, &v| DecimatedColumn {
                    min_db: col.min_db.min(v),
                    max_db: col.max_db.max(v),
                },
            )
        })
        .collect()
}
/// Flatten columns into `[min0, max0, min1, max1, ...]`.
pub fn interleave(columns: &[DecimatedColumn]) -> Vec<f64> {
    columns.iter().flat_map(|c| [c.min_db, c.max_db]).collect()
}
