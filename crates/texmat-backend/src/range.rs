//! Whole-field range operators.
//!
//! These reductions need the complete field (global min, max, mean), so every
//! stage calls them only after its per-pixel work has finished. All of them
//! treat a flat input (`max == min`) as degenerate and fall back to a uniform
//! 0.5 instead of dividing by zero.

/// Value substituted for every element of a degenerate field.
pub const DEGENERATE_FILL: f64 = 0.5;

/// Smallest and largest value, or `None` for an empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Arithmetic mean (0 for an empty slice).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Linearly map the observed range onto [0, 1].
///
/// Returns `false` when the input was flat and has been replaced by
/// [`DEGENERATE_FILL`].
pub fn normalize_min_max(values: &mut [f64]) -> bool {
    remap_range(values, 0.0, 1.0)
}

/// Linearly map the observed range onto [lo, hi].
///
/// Returns `false` when the input was flat and has been replaced by
/// [`DEGENERATE_FILL`].
pub fn remap_range(values: &mut [f64], lo: f64, hi: f64) -> bool {
    let Some((min, max)) = min_max(values) else {
        return true;
    };
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        values.fill(DEGENERATE_FILL);
        return false;
    }

    let scale = (hi - lo) / span;
    for v in values.iter_mut() {
        *v = (*v - min) * scale + lo;
    }
    true
}

/// Map the observed range onto a band centered on 0.5.
///
/// The band is `[0.5 - m, 0.5 + m]` with `m = 0.5 * strength / 100`, so a
/// strength of 100 spans the full unit range.
pub fn remap_midpoint(values: &mut [f64], strength: f64) -> bool {
    let midpoint = 0.5 * strength / 100.0;
    remap_range(values, 0.5 - midpoint, 0.5 + midpoint)
}

/// Shift every value so the mean becomes exactly 0.5.
pub fn recenter_mean(values: &mut [f64]) {
    let shift = 0.5 - mean(values);
    for v in values.iter_mut() {
        *v += shift;
    }
}

/// Shift the mean to 0.5 and, if needed, contract around it to fit [0, 1].
///
/// A plain shift can push the tails outside the unit range, and clipping them
/// afterwards would move the mean again. Scaling the deviations keeps the
/// mean at 0.5 while every value lands inside [0, 1].
pub fn recenter_mean_within_unit(values: &mut [f64]) {
    let Some((min, max)) = min_max(values) else {
        return;
    };
    let m = mean(values);

    let mut scale: f64 = 1.0;
    if max - m > 0.5 {
        scale = scale.min(0.5 / (max - m));
    }
    if m - min > 0.5 {
        scale = scale.min(0.5 / (m - min));
    }

    for v in values.iter_mut() {
        *v = 0.5 + (*v - m) * scale;
    }
}

/// Strength curve that pulls the field toward 1.0 as strength falls.
///
/// `out = v * s + (1 - s)` with `s = strength / 100`.
pub fn range_lower_limit(values: &mut [f64], strength: f64) {
    let s = strength / 100.0;
    for v in values.iter_mut() {
        *v = *v * s + (1.0 - s);
    }
}

/// Strength curve that scales the field toward 0.0 as strength falls.
///
/// `out = v * s` with `s = strength / 100`.
pub fn range_upper_limit(values: &mut [f64], strength: f64) {
    let s = strength / 100.0;
    for v in values.iter_mut() {
        *v *= s;
    }
}

/// Clip every value to [0, 1].
pub fn clamp01(values: &mut [f64]) {
    for v in values.iter_mut() {
        *v = v.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_normalize_stretches_to_unit_range() {
        let mut values = vec![-2.0, 0.0, 2.0, 1.0];
        assert!(normalize_min_max(&mut values));
        assert_eq!(values, vec![0.0, 0.5, 1.0, 0.75]);
    }

    #[test]
    fn test_normalize_flat_input_is_mid_gray() {
        let mut values = vec![3.0; 16];
        assert!(!normalize_min_max(&mut values));
        assert!(values.iter().all(|&v| v == DEGENERATE_FILL));
    }

    #[test]
    fn test_normalize_empty_is_noop() {
        let mut values: Vec<f64> = Vec::new();
        assert!(normalize_min_max(&mut values));
        assert!(min_max(&values).is_none());
        assert_eq!(mean(&values), 0.0);
    }

    #[test]
    fn test_remap_midpoint_band() {
        let mut values = vec![0.0, 5.0, 10.0];
        remap_midpoint(&mut values, 50.0);
        assert!(approx_eq(values[0], 0.25));
        assert!(approx_eq(values[1], 0.5));
        assert!(approx_eq(values[2], 0.75));

        let mut values = vec![0.0, 10.0];
        remap_midpoint(&mut values, 0.0);
        assert!(values.iter().all(|&v| approx_eq(v, 0.5)));
    }

    #[test]
    fn test_recenter_mean() {
        let mut values = vec![0.1, 0.2, 0.3];
        recenter_mean(&mut values);
        assert!(approx_eq(mean(&values), 0.5));
        assert!(approx_eq(values[2] - values[0], 0.2));
    }

    #[test]
    fn test_recenter_within_unit_keeps_mean_and_range() {
        // Mean is 0.1, so a plain shift would push the max to 1.4.
        let mut values = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        recenter_mean_within_unit(&mut values);
        assert!(approx_eq(mean(&values), 0.5));
        let (lo, hi) = min_max(&values).unwrap();
        assert!(lo >= 0.0 && hi <= 1.0 + 1e-12, "range [{lo}, {hi}]");
        assert!(approx_eq(hi, 1.0));
    }

    #[test]
    fn test_recenter_within_unit_is_plain_shift_when_it_fits() {
        let mut values = vec![0.2, 0.3, 0.4];
        recenter_mean_within_unit(&mut values);
        assert!(approx_eq(values[0], 0.4));
        assert!(approx_eq(values[2], 0.6));
    }

    #[test]
    fn test_strength_curves() {
        let mut lower = vec![0.0, 0.5, 1.0];
        range_lower_limit(&mut lower, 0.0);
        assert_eq!(lower, vec![1.0, 1.0, 1.0]);

        let mut lower = vec![0.0, 0.5, 1.0];
        range_lower_limit(&mut lower, 50.0);
        assert_eq!(lower, vec![0.5, 0.75, 1.0]);

        let mut upper = vec![0.0, 0.5, 1.0];
        range_upper_limit(&mut upper, 50.0);
        assert_eq!(upper, vec![0.0, 0.25, 0.5]);

        let mut upper = vec![0.2, 0.8];
        range_upper_limit(&mut upper, 100.0);
        assert_eq!(upper, vec![0.2, 0.8]);
    }

    #[test]
    fn test_clamp01() {
        let mut values = vec![-0.5, 0.5, 1.5];
        clamp01(&mut values);
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
    }
}
