use itertools::Itertools;

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    match (mean(data), data.len()) {
        (Some(data_mean), count) if count > 0 => {
            let variance = data
                .iter()
                .map(|value| {
                    let diff = data_mean - *value;

                    diff * diff
                })
                .sum::<f64>()
                / count as f64;

            Some(variance.sqrt())
        }
        _ => None,
    }
}

/// Compress level numbers into comma separated ranges: `[1, 2, 3, 5]` becomes
/// `"1-3, 5"`. Input order and duplicates do not matter.
pub fn format_levels_as_ranges(levels: &[u32]) -> String {
    let sorted: Vec<u32> = levels.iter().copied().sorted().dedup().collect();
    let mut ranges: Vec<(u32, u32)> = Vec::new();

    for level in sorted {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == level => *end = level,
            _ => ranges.push((level, level)),
        }
    }

    ranges
        .into_iter()
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .join(", ")
}

/// Format a countdown as `m:ss.t`, or `s.t` under a minute.
pub fn format_countdown(secs: f64) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u64;
    let rest = secs - (minutes as f64 * 60.0);

    if minutes > 0 {
        format!("{minutes}:{rest:04.1}")
    } else {
        format!("{rest:.1}")
    }
}
