//! Axis tick placement and tick-label formatting.
//!
//! Default spacings follow the "nice number" rule: mantissa rounded to
//! {1, 2, 5, 10} times a power of ten. Log-scale ticks fall back to the
//! linear rules when the range spans too many or too few decades.

/// Decompose `x` as `(a, b)` with `x = a·10^b` and `1 <= |a| < 10`, or
/// `(0, 0)` for zero.
pub fn magform(x: f64) -> (f64, i32) {
    if x == 0.0 {
        return (0.0, 0);
    }
    let l = x.abs().log10();
    let mut b = l.floor() as i32;
    let mut a = 10.0_f64.powf(l - l.floor());
    if a < 1.0 {
        a *= 10.0;
        b -= 1;
    }
    if x < 0.0 {
        a = -a;
    }
    (a, b)
}

fn pow10(n: i32) -> f64 {
    10.0_f64.powi(n)
}

/// Multiples of `sep` (offset from `origin`) inside `[lo, hi]` inclusive.
/// Enumerated by index so long runs of ticks do not accumulate floating
/// error.
fn ticklist(lo: f64, hi: f64, sep: f64, origin: f64) -> Vec<f64> {
    let a = ((lo - origin) / sep).ceil() as i64;
    let b = ((hi - origin) / sep).floor() as i64;
    let r0 = origin + a as f64 * sep;
    (a..=b).map(|i| r0 + (i - a) as f64 * sep).collect()
}

/// Major-tick spacing for a linear range: raw spacing `(hi-lo)/5` with
/// the mantissa rounded to the nearest of {1, 2, 5, 10}.
fn default_linear_spacing(lo: f64, hi: f64) -> f64 {
    let (a, b) = magform((hi - lo) / 5.0);
    let x = if a < (1.0 + 2.0) / 2.0 {
        1.0
    } else if a < (2.0 + 5.0) / 2.0 {
        2.0
    } else if a < (5.0 + 10.0) / 2.0 {
        5.0
    } else {
        10.0
    };
    x * pow10(b)
}

/// Default major ticks for a linear range.
pub fn linear_ticks(lo: f64, hi: f64) -> Vec<f64> {
    ticklist(lo, hi, default_linear_spacing(lo, hi), 0.0)
}

/// Default major ticks for a logarithmic range.
pub fn log_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let nlo = lo.log10().ceil() as i32;
    let nhi = hi.log10().floor() as i32;
    let nn = nhi - nlo + 1;

    if nn >= 10 {
        // Too many decades for one tick each: lay linear ticks in log
        // space and exponentiate back.
        linear_ticks(lo.log10(), hi.log10())
            .into_iter()
            .map(|t| 10.0_f64.powf(t))
            .collect()
    } else if nn >= 2 {
        (nlo..=nhi).map(pow10).collect()
    } else {
        // Less than two decades: decade ticks are too coarse.
        linear_ticks(lo, hi)
    }
}

/// Exactly `num` evenly spaced ticks over a linear range. Fewer than
/// two ticks cannot span a range; counts below 2 are treated as 2.
pub fn linear_ticks_n(lo: f64, hi: f64, num: usize) -> Vec<f64> {
    let num = num.max(2);
    let b = (hi - lo) / (num - 1) as f64;
    (0..num).map(|i| lo + i as f64 * b).collect()
}

/// Exactly `num` ticks evenly spaced in log10, exponentiated back.
/// Counts below 2 are treated as 2, as in [`linear_ticks_n`].
pub fn log_ticks_n(lo: f64, hi: f64, num: usize) -> Vec<f64> {
    let num = num.max(2);
    let a = lo.log10();
    let b = (hi.log10() - a) / (num - 1) as f64;
    (0..num)
        .map(|i| 10.0_f64.powf(a + i as f64 * b))
        .collect()
}

/// Minor ticks for a linear range, anchored at the first major tick.
///
/// The major spacing is split into `num+1` parts; the default is 4
/// subdivisions, dropping to 3 when the major mantissa lies in (1, 3.5)
/// so subticks stay visually proportioned to the major grid.
pub fn linear_subticks(lo: f64, hi: f64, ticks: &[f64], num: Option<usize>) -> Vec<f64> {
    if ticks.len() < 2 {
        return Vec::new();
    }
    let major_div = (ticks[ticks.len() - 1] - ticks[0]) / (ticks.len() - 1) as f64;
    let n = num.unwrap_or_else(|| {
        let (a, _) = magform(major_div);
        if 1.0 < a && a < (2.0 + 5.0) / 2.0 {
            3
        } else {
            4
        }
    });
    let minor_div = major_div / (n + 1) as f64;
    ticklist(lo, hi, minor_div, ticks[0])
}

/// Minor ticks for a logarithmic range: mantissas 1..9 of every decade in
/// range when 2–9 decades are spanned, otherwise the linear rules.
pub fn log_subticks(lo: f64, hi: f64, ticks: &[f64], num: Option<usize>) -> Vec<f64> {
    let nlo = lo.log10().ceil() as i32;
    let nhi = hi.log10().floor() as i32;
    let nn = nhi - nlo + 1;

    if nn >= 10 {
        let log_ticks: Vec<f64> = ticks.iter().map(|t| t.log10()).collect();
        linear_subticks(lo.log10(), hi.log10(), &log_ticks, num)
            .into_iter()
            .map(|t| 10.0_f64.powf(t))
            .collect()
    } else if nn >= 2 {
        let mut minor = Vec::new();
        for i in (nlo - 1)..=nhi {
            for j in 1..10 {
                let z = j as f64 * pow10(i);
                if lo <= z && z <= hi {
                    minor.push(z);
                }
            }
        }
        minor
    } else {
        linear_subticks(lo, hi, ticks, num)
    }
}

/// Format a tick value for display.
///
/// `range` is the overall tick span; for extremely small spans the label
/// keeps enough decimal places to distinguish neighbors instead of
/// collapsing to "0.000000".
pub fn format_tick_label(x: f64, range: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    let (a, b) = magform(x);
    if b.abs() > 4 {
        // Round the mantissa to six decimals so log10 noise does not
        // leak into labels.
        let a = (a * 1e6).round() / 1e6;
        if a == 1.0 {
            return format!("10^{}", b);
        } else if a == -1.0 {
            return format!("-10^{}", b);
        }
        return format!("{}\u{d7}10^{}", a, b);
    }
    if range < 1e-6 {
        let (_, rb) = magform(range);
        return format!("{:.*}", rb.unsigned_abs() as usize, x);
    }
    // Compact general format.
    format!("{}", x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magform_reconstructs() {
        for &x in &[3.0, 0.5, -47.0, 1e-9, 6.02e23, -2.5e-7, 1.0] {
            let (a, b) = magform(x);
            assert!((1.0..10.0).contains(&a.abs()), "mantissa {} for {}", a, x);
            let back = a * 10.0_f64.powi(b);
            assert!((back - x).abs() <= 1e-12 * x.abs(), "{} != {}", back, x);
        }
        assert_eq!(magform(0.0), (0.0, 0));
    }

    #[test]
    fn test_linear_ticks_nice_spacing() {
        // Raw spacing 47/5 = 9.4; mantissa 9.4 rounds up to 10.
        assert_eq!(linear_ticks(0.0, 47.0), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_linear_ticks_contained_and_ascending() {
        for &(lo, hi) in &[(0.0, 1.0), (-3.7, 12.2), (-1.0, 1.0), (0.0, 0.8)] {
            let ticks = linear_ticks(lo, hi);
            assert!(!ticks.is_empty());
            for w in ticks.windows(2) {
                assert!(w[0] < w[1]);
            }
            for &t in &ticks {
                assert!(lo <= t && t <= hi, "tick {} outside [{}, {}]", t, lo, hi);
            }
        }
    }

    #[test]
    fn test_log_ticks_decades() {
        // 1..1000 spans 4 decades: one tick per decade.
        assert_eq!(log_ticks(1.0, 1000.0), vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_log_ticks_narrow_range_falls_back_to_linear() {
        let ticks = log_ticks(2.0, 9.0);
        assert_eq!(ticks, linear_ticks(2.0, 9.0));
    }

    #[test]
    fn test_log_ticks_many_decades() {
        let ticks = log_ticks(1.0, 1e12);
        // Linear ticks in log space: multiples of some nice spacing of
        // the exponent, exponentiated back. All must lie in range.
        assert!(ticks.len() >= 2);
        for &t in &ticks {
            assert!(t >= 1.0 - 1e-9 && t <= 1e12 * (1.0 + 1e-9));
        }
        // Geometric: constant decade ratio between neighbors.
        let r0 = ticks[1] / ticks[0];
        for w in ticks.windows(2) {
            assert!((w[1] / w[0] / r0 - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_explicit_count_linear() {
        assert_eq!(
            linear_ticks_n(0.0, 1.0, 5),
            vec![0.0, 0.25, 0.5, 0.75, 1.0]
        );
    }

    #[test]
    fn test_tick_count_below_two_is_clamped() {
        // 0 or 1 requested ticks cannot span a range; both degrade to
        // the two endpoints instead of overflowing or producing NaN.
        assert_eq!(linear_ticks_n(0.0, 10.0, 0), vec![0.0, 10.0]);
        assert_eq!(linear_ticks_n(0.0, 10.0, 1), vec![0.0, 10.0]);
        let ticks = log_ticks_n(1.0, 100.0, 0);
        assert_eq!(ticks.len(), 2);
        assert!((ticks[0] - 1.0).abs() < 1e-9);
        assert!((ticks[1] - 100.0).abs() < 1e-9);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn test_explicit_count_log_geometric() {
        let ticks = log_ticks_n(1.0, 10000.0, 5);
        let expect = [1.0, 10.0, 100.0, 1000.0, 10000.0];
        assert_eq!(ticks.len(), 5);
        for (t, e) in ticks.iter().zip(expect.iter()) {
            assert!((t - e).abs() < 1e-9 * e);
        }
    }

    #[test]
    fn test_linear_subticks_default_counts() {
        // Major spacing 10 (mantissa 1): default 4 subdivisions,
        // minor spacing 2.
        let majors = linear_ticks(0.0, 47.0);
        let minors = linear_subticks(0.0, 47.0, &majors, None);
        assert_eq!(minors[0], 0.0);
        assert!((minors[1] - 2.0).abs() < 1e-12);
        assert!(minors.iter().all(|&t| (0.0..=47.0).contains(&t)));

        // Major spacing 2 (mantissa in (1, 3.5)): 3 subdivisions,
        // minor spacing 0.5.
        let majors = linear_ticks(0.0, 10.0);
        let minors = linear_subticks(0.0, 10.0, &majors, None);
        assert!((minors[1] - minors[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_log_subticks_mantissa_pattern() {
        let majors = log_ticks(1.0, 100.0);
        let minors = log_subticks(1.0, 100.0, &majors, None);
        // Mantissas 1..9 of each decade in range: 1..9, 10..90, 100.
        assert_eq!(minors.first(), Some(&1.0));
        assert!(minors.contains(&3.0));
        assert!(minors.contains(&40.0));
        assert_eq!(minors.last(), Some(&100.0));
        for w in minors.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn test_format_tick_label() {
        assert_eq!(format_tick_label(0.0, 10.0), "0");
        assert_eq!(format_tick_label(2.5, 10.0), "2.5");
        assert_eq!(format_tick_label(100000.0, 1e6), "10^5");
        assert_eq!(format_tick_label(-100000.0, 1e6), "-10^5");
        assert_eq!(format_tick_label(300000.0, 1e6), "3\u{d7}10^5");
        // Tiny range: decimals derived from the range's own exponent.
        assert_eq!(format_tick_label(1.0000001, 1e-7), "1.0000001");
    }
}
