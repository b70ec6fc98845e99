//! Pure numeric helpers shared by several indicators.
//!
//! Every function here propagates NaN instead of rejecting it, and none of
//! them panics on short input: callers apply the minimum-sample-size policy
//! before relying on a result.

/// Tolerance under which a drawdown is treated as zero.
pub const DRAWDOWN_EPSILON: f64 = 1e-8;

/// Divides `dividend` by `divisor`, yielding NaN when the divisor is exactly zero.
pub fn safe_div(dividend: f64, divisor: f64) -> f64 {
    if divisor == 0.0 {
        return f64::NAN;
    }
    dividend / divisor
}

/// Sign with `sign(0) == 0` and `sign(NaN) == NaN`, unlike `f64::signum`.
pub fn sign(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        value * 0.0
    } else {
        value.signum()
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (1 for the sample variance).
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return f64::NAN;
    }
    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    sum_sq / (values.len() - ddof) as f64
}

pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    variance(values, ddof).sqrt()
}

/// Sample covariance (ddof = 1) of two equally long series.
pub fn covariance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.len() < 2 {
        return f64::NAN;
    }
    let (mean_a, mean_b) = (mean(a), mean(b));
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    sum / (a.len() - 1) as f64
}

/// Total compounded return, computed in log space: `expm1(sum(log1p(r)))`.
pub fn cumulative_return(returns: &[f64]) -> f64 {
    returns.iter().map(|r| r.ln_1p()).sum::<f64>().exp_m1()
}

/// Scales a total return over `period_count` periods to a yearly figure.
pub fn annualize(total_return: f64, annual_factor: f64, period_count: usize) -> f64 {
    (1.0 + total_return).powf(annual_factor / period_count as f64) - 1.0
}

/// Relative distance below the running peak for each period, as a fraction (<= 0).
///
/// The curve starts from a net value of 1 before the first period, so a loss
/// in the very first period already counts as a drawdown.
pub fn drawdown_ratios(returns: &[f64]) -> Vec<f64> {
    let mut log_nav = 0.0;
    let mut peak = 1.0_f64;
    let mut peak_is_nan = false;
    returns
        .iter()
        .map(|r| {
            log_nav += r.ln_1p();
            let nav = log_nav.exp();
            // f64::max would silently skip NaN; the running maximum must not.
            peak_is_nan |= nav.is_nan();
            if peak_is_nan {
                return f64::NAN;
            }
            peak = peak.max(nav);
            (nav - peak) / peak
        })
        .collect()
}

/// Largest peak-to-trough decline as an unsigned magnitude (>= 0).
///
/// NaN anywhere in the curve makes the result NaN.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut worst = 0.0_f64;
    for ratio in drawdown_ratios(returns) {
        if ratio.is_nan() {
            return f64::NAN;
        }
        worst = worst.min(ratio);
    }
    worst.abs()
}
