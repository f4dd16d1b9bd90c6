/// Largest peak-to-trough decline, as a fraction of the running peak.
///
/// Returns 0 for fewer than two values or a series that never falls.
pub fn max_drawdown(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mut peak = values[0];
    let mut max_drawdown = 0.0_f64;

    for &value in values {
        if value > peak {
            peak = value;
        }
        // Nothing to measure against until a positive peak exists.
        if peak <= 0.0 {
            continue;
        }
        let drawdown = (peak - value) / peak;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}
