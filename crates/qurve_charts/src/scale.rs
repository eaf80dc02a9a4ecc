//! Linear scales and automatic domains.

/// Maps a numeric domain onto a pixel range.
///
/// Immutable: derive a new scale instead of mutating one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    pub fn with_range(&self, range_min: f64, range_max: f64) -> Self {
        Self::new(self.domain_min, self.domain_max, range_min, range_max)
    }

    /// Domain value to range value. A zero-width domain maps everything to
    /// the start of the range.
    pub fn map(&self, value: f64) -> f64 {
        let d = self.domain_max - self.domain_min;
        if d == 0.0 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }

    /// Range value back to domain value. A zero-width range maps everything
    /// to the start of the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let r = self.range_max - self.range_min;
        if r == 0.0 {
            return self.domain_min;
        }
        let t = (px - self.range_min) / r;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Nice tick values, ascending, within the domain.
    ///
    /// Returns `[d0]` for a zero-width domain and nothing for a non-finite
    /// domain or `count == 0`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.sorted_domain();
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        let Some(step) = nice_step(hi - lo, count) else {
            return Vec::new();
        };

        let start = (lo / step - EPS).ceil();
        let end = (hi / step + EPS).floor();
        if !start.is_finite() || !end.is_finite() || end < start || end - start > MAX_TICKS {
            return Vec::new();
        }

        let decimals = step_decimals(step);
        let slack = step * EPS;
        let n = (end - start) as usize;
        let mut out = Vec::with_capacity(n + 1);
        for k in 0..=n {
            let v = round_to(step * (start + k as f64), decimals);
            if v >= lo - slack && v <= hi + slack {
                out.push(v);
            }
        }
        out
    }

    /// The step [`ticks`](Self::ticks) would use, if any.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = self.sorted_domain();
        if !lo.is_finite() || !hi.is_finite() || lo == hi {
            return None;
        }
        nice_step(hi - lo, count)
    }

    /// Copy with the domain widened outward to whole tick steps.
    pub fn nice(&self, count: usize) -> Self {
        let Some(step) = self.tick_step(count) else {
            return *self;
        };
        let decimals = step_decimals(step);
        let down = |v: f64| round_to((v / step + EPS).floor() * step, decimals);
        let up = |v: f64| round_to((v / step - EPS).ceil() * step, decimals);
        let (d0, d1) = if self.domain_min <= self.domain_max {
            (down(self.domain_min), up(self.domain_max))
        } else {
            (up(self.domain_min), down(self.domain_max))
        };
        Self::new(d0, d1, self.range_min, self.range_max)
    }

    fn sorted_domain(&self) -> (f64, f64) {
        if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        }
    }
}

// Relative tolerance for snapping values onto the step grid.
const EPS: f64 = 1e-9;

// Upper bound on emitted ticks, whatever `count` asks for.
const MAX_TICKS: f64 = 10_000.0;

/// 1/2/5 x 10^k step for splitting `span` into roughly `count` intervals.
fn nice_step(span: f64, count: usize) -> Option<f64> {
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }
    let raw = span / count as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    let magnitude = raw.log10().floor() as i32;
    let base = pow10(magnitude);
    let normalized = raw / base;
    let nice = if normalized < 2.0 {
        1.0
    } else if normalized < 5.0 {
        2.0
    } else {
        5.0
    };
    let step = nice * base;
    (step.is_finite() && step > 0.0).then_some(step)
}

// Exact for the magnitudes charts deal with, unlike `powf`.
fn pow10(exp: i32) -> f64 {
    if exp >= 0 {
        10f64.powi(exp)
    } else {
        1.0 / 10f64.powi(-exp)
    }
}

fn step_decimals(step: f64) -> i32 {
    (-step.log10().floor()).max(0.0) as i32
}

fn round_to(v: f64, decimals: i32) -> f64 {
    if decimals == 0 {
        return v.round();
    }
    let p = pow10(decimals);
    let r = (v * p).round() / p;
    if r.is_finite() {
        r
    } else {
        v
    }
}

/// Fallback domain when nothing finite is available.
pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Padding used when all values are equal.
pub const FLAT_DOMAIN_PAD: f64 = 10.0;

/// Value-axis domain: min/max padded by 10% of the span.
pub fn auto_value_domain<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let Some((min, max)) = min_max(values) else {
        return DEFAULT_DOMAIN;
    };
    let pad = if max > min {
        (max - min) * 0.1
    } else {
        FLAT_DOMAIN_PAD
    };
    (min - pad, max + pad)
}

/// Category-axis domain: exact min/max, widened by one unit each way when flat.
pub fn auto_index_domain<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let (min, max) = min_max(values)?;
    if min == max {
        Some((min - 1.0, max + 1.0))
    } else {
        Some((min, max))
    }
}

fn min_max<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts_midpoint() {
        let s = LinearScale::new(0.0, 10.0, 0.0, 100.0);
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.invert(50.0), 5.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = LinearScale::new(3.0, 3.0, 20.0, 200.0);
        for v in [-1e9, 0.0, 3.0, 42.0] {
            assert_eq!(s.map(v), 20.0);
        }
    }

    #[test]
    fn degenerate_range_inverts_to_domain_start() {
        let s = LinearScale::new(1.0, 5.0, 7.0, 7.0);
        assert_eq!(s.invert(123.0), 1.0);
    }

    #[test]
    fn invert_handles_descending_range() {
        let s = LinearScale::new(0.0, 100.0, 200.0, 100.0);
        assert!((s.invert(150.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_use_nice_steps() {
        let s = LinearScale::new(0.0, 10.0, 0.0, 100.0);
        assert_eq!(s.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let s = LinearScale::new(0.0, 1.0, 0.0, 100.0);
        assert_eq!(s.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        let s = LinearScale::new(-3.0, 97.0, 0.0, 1.0);
        assert_eq!(s.ticks(4), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn ticks_are_rounded_to_step_precision() {
        let s = LinearScale::new(0.1, 0.7, 0.0, 1.0);
        assert_eq!(s.ticks(4), vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
    }

    #[test]
    fn ticks_for_reversed_domain_are_ascending() {
        let s = LinearScale::new(10.0, 0.0, 0.0, 100.0);
        assert_eq!(s.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn ticks_degenerate_inputs() {
        assert_eq!(LinearScale::new(4.0, 4.0, 0.0, 1.0).ticks(5), vec![4.0]);
        assert!(LinearScale::new(0.0, f64::NAN, 0.0, 1.0).ticks(5).is_empty());
        assert!(LinearScale::new(f64::NEG_INFINITY, 1.0, 0.0, 1.0)
            .ticks(5)
            .is_empty());
        assert!(LinearScale::new(0.0, 10.0, 0.0, 1.0).ticks(0).is_empty());
    }

    #[test]
    fn nice_expands_outward() {
        let s = LinearScale::new(0.5, 9.3, 0.0, 100.0).nice(5);
        assert_eq!(s.domain(), (0.0, 10.0));
        assert_eq!(s.range(), (0.0, 100.0));
    }

    #[test]
    fn nice_keeps_aligned_domain() {
        let s = LinearScale::new(0.0, 10.0, 0.0, 1.0).nice(5);
        assert_eq!(s.domain(), (0.0, 10.0));
    }

    #[test]
    fn auto_value_domain_pads() {
        assert_eq!(auto_value_domain([0.0, 10.0]), (-1.0, 11.0));
        assert_eq!(auto_value_domain([5.0, 5.0]), (-5.0, 15.0));
        assert_eq!(auto_value_domain([f64::NAN]), DEFAULT_DOMAIN);
        assert_eq!(auto_value_domain(std::iter::empty()), DEFAULT_DOMAIN);
    }

    #[test]
    fn auto_index_domain_widens_flat() {
        assert_eq!(auto_index_domain([2.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(auto_index_domain([3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(auto_index_domain(std::iter::empty()), None);
    }
}
