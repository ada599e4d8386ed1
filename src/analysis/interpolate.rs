//! Linear interpolation helpers for threshold and crossing times

/// Time at which a straight line through `(t0, v0)` and `(t1, v1)` reaches `target`.
///
/// Assumes `target` lies between `v0` and `v1`. A flat segment returns `t1`,
/// the first time the target is known to be reached.
pub fn time_at_value(t0: f64, v0: f64, t1: f64, v1: f64, target: f64) -> f64 {
    let rise = v1 - v0;
    if rise == 0.0 {
        return t1;
    }
    let fraction = ((target - v0) / rise).clamp(0.0, 1.0);
    t0 + fraction * (t1 - t0)
}

/// Interpolated time of the first point in `points` whose value reaches `target`
/// (`value >= target`). Returns `None` if no point reaches it.
pub fn first_time_reaching<I>(points: I, target: f64) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut prev: Option<(f64, f64)> = None;
    for (t, v) in points {
        if v >= target {
            return Some(match prev {
                Some((t0, v0)) => time_at_value(t0, v0, t, v, target),
                None => t,
            });
        }
        prev = Some((t, v));
    }
    None
}
