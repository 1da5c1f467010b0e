//! Window statistics and EMA recurrences over plain and optional series.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divisor `n - 1`). Needs at least two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// EMA smoothing factor `2 / (period + 1)`.
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One step of the EMA recurrence.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = smoothing_factor(period);
    value * k + previous * (1.0 - k)
}

/// Trailing mean over `period` values, aligned with the input.
///
/// Indices below `period - 1` are `None`.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, mean)
}

/// Trailing sample standard deviation over `period` values.
pub fn rolling_sample_std_dev(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, sample_std_dev)
}

fn rolling<F>(values: &[f64], period: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for end in period..=values.len() {
        out[end - 1] = stat(&values[end - period..end]);
    }
    out
}

/// EMA over a series with an undefined prefix.
///
/// The seed is the simple mean of the first run of `period` consecutive
/// defined values and sits on the last index of that run. A gap in the
/// input resets the recurrence, which then reseeds on the next full run.
pub fn ema_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let mut previous: Option<f64> = None;
    let mut run_start = 0;

    for (i, value) in values.iter().enumerate() {
        match (*value, previous) {
            (None, _) => {
                previous = None;
                run_start = i + 1;
            }
            (Some(x), Some(prev)) => {
                let ema = ema_from_previous(x, prev, period);
                out[i] = Some(ema);
                previous = Some(ema);
            }
            (Some(_), None) => {
                if i + 1 - run_start == period {
                    let window: Vec<f64> = values[run_start..=i].iter().flatten().copied().collect();
                    let seed = mean(&window);
                    out[i] = seed;
                    previous = seed;
                }
            }
        }
    }

    out
}

/// Lift a plain series into an optional one.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}
