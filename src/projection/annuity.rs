//! Compounding primitives shared by every calculator

/// `(1 + rate)^periods`, exact integer powers where the exponent fits an `i32`
fn growth_factor(rate: f64, periods: u32) -> f64 {
    match i32::try_from(periods) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => (1.0 + rate).powf(periods as f64),
    }
}

/// Future value of a level annuity of `payment` per period
///
/// Payments at the end of each period: `payment * ((1 + rate)^periods - 1) / rate`.
/// A zero rate degenerates to `payment * periods`.
pub fn future_value(payment: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return payment * periods as f64;
    }
    payment * (growth_factor(rate, periods) - 1.0) / rate
}

/// Discount a single future sum back `periods` periods
///
/// A zero rate degenerates to `future_value / periods`; callers must pass
/// `periods > 0` for that case to be meaningful.
pub fn present_value(future_value: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return future_value / periods as f64;
    }
    future_value / growth_factor(rate, periods)
}

/// Year-by-year balance of a fund receiving `payment` at the start of each year
///
/// Returns `periods + 1` balances: index 0 is the opening (zero) balance and each
/// later entry is `(previous + payment) * (1 + rate)`.
pub fn annuity_due_balances(payment: f64, rate: f64, periods: u32) -> Vec<f64> {
    let mut balances = Vec::with_capacity(periods as usize + 1);
    let mut balance = 0.0;
    balances.push(balance);
    for _ in 0..periods {
        balance = (balance + payment) * (1.0 + rate);
        balances.push(balance);
    }
    balances
}

/// Closing balance of [`annuity_due_balances`]
pub fn annuity_due_value(payment: f64, rate: f64, periods: u32) -> f64 {
    (0..periods).fold(0.0, |balance, _| (balance + payment) * (1.0 + rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_is_simple_sum() {
        for &(p, n) in &[(1_000.0, 1), (150_000.0, 10), (-25.0, 7)] {
            assert_eq!(future_value(p, 0.0, n), p * n as f64);
        }
    }

    #[test]
    fn test_zero_periods_is_zero() {
        for &r in &[0.0, 0.05, 0.12, -0.03] {
            assert_eq!(future_value(150_000.0, r, 0), 0.0);
        }
    }

    #[test]
    fn test_future_value_known() {
        // 150k/year for 10 years at 8%
        assert_relative_eq!(future_value(150_000.0, 0.08, 10), 2_172_984.37, max_relative = 1e-8);
        // Single period is just the payment
        assert_relative_eq!(future_value(100.0, 0.07, 1), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_present_value() {
        assert_relative_eq!(present_value(1_100.0, 0.10, 1), 1_000.0, max_relative = 1e-12);
        assert_relative_eq!(present_value(1_000.0, 0.0, 4), 250.0, max_relative = 1e-9);
        // Discounting undoes compounding
        let fv = 50_000.0 * 1.06_f64.powi(15);
        assert_relative_eq!(present_value(fv, 0.06, 15), 50_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_annuity_due_is_one_period_ahead() {
        let balances = annuity_due_balances(162_500.0, 0.05, 10);
        assert_eq!(balances.len(), 11);
        assert_eq!(balances[0], 0.0);
        assert_relative_eq!(balances[1], 170_625.0, max_relative = 1e-12);
        assert_relative_eq!(
            balances[10],
            future_value(162_500.0, 0.05, 10) * 1.05,
            max_relative = 1e-12
        );
        assert_relative_eq!(balances[10], annuity_due_value(162_500.0, 0.05, 10), max_relative = 1e-12);
    }

    #[test]
    fn test_periods_beyond_i32_do_not_wrap() {
        let periods = i32::MAX as u32 + 1;
        let fv = future_value(100.0, 0.05, periods);
        assert!(fv > 0.0);
        assert!(fv.is_infinite());
        assert_eq!(present_value(100.0, 0.05, periods), 0.0);
        // Largest exponent that still fits takes the integer-power path
        assert!(future_value(100.0, 0.05, i32::MAX as u32) > 0.0);
    }

    #[test]
    fn test_annuity_due_zero_periods() {
        assert_eq!(annuity_due_balances(10.0, 0.05, 0), vec![0.0]);
        assert_eq!(annuity_due_value(10.0, 0.05, 0), 0.0);
    }
}
