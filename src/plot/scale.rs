//! Mapping data values onto `[0, 1]` along an axis.

/// Maps `x` in `[min, max]` to a normalized position.
pub trait Scale {
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64;
}

impl<F> Scale for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64 {
        self(min, max, x)
    }
}

/// `(x − min) / (max − min)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScale;

impl Scale for LinearScale {
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64 {
        (x - min) / (max - min)
    }
}

/// `(log x − log min) / (log max − log min)`.
///
/// Axes sanitize their range before normalizing, so `min == max` never
/// reaches this scale from a plot.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogScale;

impl Scale for LogScale {
    /// # Panics
    ///
    /// If `min` or `x` is not positive.
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64 {
        assert!(min > 0.0 && x > 0.0, "log scale needs positive values (min = {min}, x = {x})");
        let log_min = min.ln();
        (x.ln() - log_min) / (max.ln() - log_min)
    }
}

/// Another scale, flipped so `max` maps to 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvertedScale<S>(pub S);

impl<S: Scale> Scale for InvertedScale<S> {
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64 {
        self.0.normalize(max, min, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear() {
        assert_eq!(LinearScale.normalize(0.0, 10.0, 2.5), 0.25);
        assert_eq!(LinearScale.normalize(-1.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn log() {
        assert_eq!(LogScale.normalize(1.0, 100.0, 1.0), 0.0);
        assert!((LogScale.normalize(1.0, 100.0, 10.0) - 0.5).abs() < 1e-12);
        assert!((LogScale.normalize(1.0, 100.0, 100.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "log scale needs positive values")]
    fn log_rejects_zero() {
        LogScale.normalize(0.0, 10.0, 1.0);
    }

    #[test]
    fn inverted() {
        assert_eq!(InvertedScale(LinearScale).normalize(0.0, 10.0, 2.5), 0.75);
        assert!((InvertedScale(LogScale).normalize(1.0, 100.0, 100.0)).abs() < 1e-12);
    }

    #[test]
    fn closures_are_scales() {
        let half = |_: f64, _: f64, _: f64| 0.5;
        assert_eq!(half.normalize(0.0, 1.0, 7.0), 0.5);
    }
}
