//! Tick generators.

use crate::backend::format_g;

/// A tick mark at `value`. An empty label makes it a minor tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    pub fn major(value: f64) -> Tick {
        Tick { value, label: format_g(value) }
    }

    pub fn minor(value: f64) -> Tick {
        Tick { value, label: String::new() }
    }

    pub fn is_minor(&self) -> bool {
        self.label.is_empty()
    }
}

/// Produces the ticks for an axis range.
///
/// Ticks outside `[min, max]` are allowed; axes drop them when drawing.
pub trait Ticker {
    fn ticks(&self, min: f64, max: f64) -> Vec<Tick>;
}

impl<F> Ticker for F
where
    F: Fn(f64, f64) -> Vec<Tick>,
{
    fn ticks(&self, min: f64, max: f64) -> Vec<Tick> {
        self(min, max)
    }
}

/// Number of major ticks aimed for.
const SUGGESTED_TICKS: f64 = 3.0;

/// Gaps between [`SUGGESTED_TICKS`] majors.
const SUGGESTED_GAPS: f64 = SUGGESTED_TICKS - 1.0;

/// Labeled ticks at round multiples with unlabeled ticks between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTicks;

/// Multiples of `delta` in `[min, max]`, stopping early if adding `delta`
/// no longer changes the value. Values within rounding error of an end are
/// snapped onto it.
fn multiples(min: f64, max: f64, delta: f64) -> Vec<f64> {
    let eps = delta * 1e-9;
    let mut out = Vec::new();
    let mut k = (min / delta).floor();
    let mut val = k * delta;
    while val <= max + eps {
        if val >= min - eps {
            out.push(val.clamp(min, max));
        }
        k += 1.0;
        let next = k * delta;
        if next == val {
            break;
        }
        val = next;
    }
    out
}

impl Ticker for DefaultTicks {
    /// # Panics
    ///
    /// If `max < min`.
    fn ticks(&self, min: f64, max: f64) -> Vec<Tick> {
        assert!(max >= min, "illegal tick range [{min}, {max}]");
        let range = max - min;
        if range == 0.0 || !range.is_finite() {
            return vec![Tick::major(min)];
        }

        let mut tens = 10f64.powi(range.log10().floor() as i32);
        while range / tens < SUGGESTED_GAPS {
            tens /= 10.0;
        }
        let major_mult = match (range / tens / SUGGESTED_GAPS).floor() as u32 {
            7 => 6,
            9 => 8,
            m => m,
        };
        let major = f64::from(major_mult) * tens;
        let mut ticks: Vec<Tick> =
            multiples(min, max, major).into_iter().map(Tick::major).collect();

        let minor = match major_mult {
            3 | 6 => major / 3.0,
            5 => major / 5.0,
            _ => major / 2.0,
        };
        let eps = minor * 1e-9;
        let minors: Vec<Tick> = multiples(min, max, minor)
            .into_iter()
            .filter(|v| !ticks.iter().any(|t| (t.value - v).abs() <= eps))
            .map(Tick::minor)
            .collect();
        ticks.extend(minors);
        ticks
    }
}

/// Labeled ticks at powers of ten, unlabeled ticks at 2..9 times each.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTicks;

impl Ticker for LogTicks {
    /// # Panics
    ///
    /// If `min` or `max` is not positive.
    fn ticks(&self, min: f64, max: f64) -> Vec<Tick> {
        assert!(min > 0.0 && max > 0.0, "log ticks need a positive range [{min}, {max}]");
        let mut exp = min.log10().floor() as i32;
        let mut ticks = Vec::new();
        let mut val = 10f64.powi(exp);
        while val < max {
            ticks.push(Tick::major(val));
            ticks.extend((2..10).map(|i| Tick::minor(f64::from(i) * val)));
            exp += 1;
            val = 10f64.powi(exp);
        }
        ticks.push(Tick::major(val));
        ticks
    }
}

/// The same ticks whatever the range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantTicks(pub Vec<Tick>);

impl Ticker for ConstantTicks {
    fn ticks(&self, _min: f64, _max: f64) -> Vec<Tick> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(ticks: &[Tick]) -> (Vec<f64>, Vec<f64>) {
        let major = ticks.iter().filter(|t| !t.is_minor()).map(|t| t.value).collect();
        let minor = ticks.iter().filter(|t| t.is_minor()).map(|t| t.value).collect();
        (major, minor)
    }

    fn assert_close(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "{got:?} vs {want:?}");
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn unit_range_has_halves() {
        // tens = 0.1, majorMult = floor(10 / 2) = 5, minors in fifths
        let ticks = DefaultTicks.ticks(0.0, 1.0);
        let (major, minor) = split(&ticks);
        assert_close(&major, &[0.0, 0.5, 1.0]);
        assert_close(&minor, &[0.1, 0.2, 0.3, 0.4, 0.6, 0.7, 0.8, 0.9]);
        let labels: Vec<&str> =
            ticks.iter().filter(|t| !t.is_minor()).map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["0", "0.5", "1"]);
    }

    #[test]
    fn mult_two_gets_halves() {
        // range 4: tens = 1, majorMult = 2
        let (major, minor) = split(&DefaultTicks.ticks(0.0, 4.0));
        assert_close(&major, &[0.0, 2.0, 4.0]);
        assert_close(&minor, &[1.0, 3.0]);
    }

    #[test]
    fn seven_becomes_six() {
        // range 15: tens = 1, floor(15 / 2) = 7 -> 6, minor = 2
        let (major, minor) = split(&DefaultTicks.ticks(0.0, 15.0));
        assert_close(&major, &[0.0, 6.0, 12.0]);
        assert_close(&minor, &[2.0, 4.0, 8.0, 10.0, 14.0]);
    }

    #[test]
    fn nine_becomes_eight() {
        // range 18: tens = 1, floor(18 / 2) = 9 -> 8, minor = 4
        let (major, minor) = split(&DefaultTicks.ticks(0.0, 18.0));
        assert_close(&major, &[0.0, 8.0, 16.0]);
        assert_close(&minor, &[4.0, 12.0]);
    }

    #[test]
    fn majors_increase_within_range() {
        let ranges = [(-3.7, 12.2), (0.001, 0.0042), (1e6, 3.5e6), (-1.0, -0.25), (0.0, 100.0)];
        for (min, max) in ranges {
            let (major, _) = split(&DefaultTicks.ticks(min, max));
            assert!(!major.is_empty(), "[{min}, {max}]");
            assert!(major.windows(2).all(|w| w[0] < w[1]), "{major:?}");
            assert!(major.iter().all(|&v| v >= min && v <= max), "{major:?}");
        }
    }

    #[test]
    fn exponent_labels() {
        let ticks = DefaultTicks.ticks(0.0, 3e6);
        assert!(ticks.iter().any(|t| t.label == "1e+06"), "{ticks:?}");
    }

    #[test]
    #[should_panic(expected = "illegal tick range")]
    fn reversed_range_panics() {
        DefaultTicks.ticks(1.0, 0.0);
    }

    #[test]
    fn log_decades() {
        let ticks = LogTicks.ticks(1.0, 100.0);
        let (major, minor) = split(&ticks);
        assert_eq!(major, [1.0, 10.0, 100.0]);
        let want: Vec<f64> =
            (2..10).map(f64::from).chain((2..10).map(|i| f64::from(i) * 10.0)).collect();
        assert_eq!(minor, want);
        assert_eq!(ticks[0].label, "1");
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("100"));
    }

    #[test]
    fn constant_and_closure_tickers() {
        let fixed = ConstantTicks(vec![Tick::major(2.0), Tick::minor(3.0)]);
        assert_eq!(fixed.ticks(0.0, 1.0).len(), 2);
        let halves = |min: f64, max: f64| vec![Tick::major((min + max) / 2.0)];
        assert_eq!(halves.ticks(0.0, 4.0), vec![Tick { value: 2.0, label: "2".into() }]);
    }
}
