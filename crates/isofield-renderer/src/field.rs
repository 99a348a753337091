//! Scalar field capability consumed by the visualizer.

use isofield_common::DomainRect;

/// A real function of two variables with known extrema over a rectangle.
///
/// Implementations must be pure: the same point always yields the same
/// value, and evaluation has no side effects.
pub trait ScalarField {
    /// Evaluate the field at `(x, y)`.
    fn apply(&self, x: f64, y: f64) -> f64;

    /// Smallest value of the field over `domain`.
    fn min(&self, domain: &DomainRect) -> f64;

    /// Largest value of the field over `domain`.
    fn max(&self, domain: &DomainRect) -> f64;
}

impl<T: ScalarField + ?Sized> ScalarField for &T {
    fn apply(&self, x: f64, y: f64) -> f64 {
        (**self).apply(x, y)
    }

    fn min(&self, domain: &DomainRect) -> f64 {
        (**self).min(domain)
    }

    fn max(&self, domain: &DomainRect) -> f64 {
        (**self).max(domain)
    }
}

impl<T: ScalarField + ?Sized> ScalarField for Box<T> {
    fn apply(&self, x: f64, y: f64) -> f64 {
        (**self).apply(x, y)
    }

    fn min(&self, domain: &DomainRect) -> f64 {
        (**self).min(domain)
    }

    fn max(&self, domain: &DomainRect) -> f64 {
        (**self).max(domain)
    }
}

/// Default number of samples per axis used by [`SampledField`].
pub const DEFAULT_EXTREMA_SAMPLES: usize = 256;

/// Adapts a closure into a [`ScalarField`], estimating extrema by
/// evaluating it on a dense regular lattice (corners included).
#[derive(Debug, Clone)]
pub struct SampledField<F> {
    function: F,
    samples: usize,
}

impl<F> SampledField<F>
where
    F: Fn(f64, f64) -> f64,
{
    pub fn new(function: F) -> Self {
        Self {
            function,
            samples: DEFAULT_EXTREMA_SAMPLES,
        }
    }

    /// Use `samples x samples` points (at least 2) when estimating extrema.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(2);
        self
    }

    /// Returns (min, max) over the lattice, ignoring NaN samples.
    fn extrema(&self, domain: &DomainRect) -> (f64, f64) {
        let steps = (self.samples - 1) as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for j in 0..self.samples {
            let y = domain.c() + domain.height() * j as f64 / steps;
            for i in 0..self.samples {
                let x = domain.a() + domain.width() * i as f64 / steps;
                let value = (self.function)(x, y);
                if value.is_nan() {
                    continue;
                }
                min = min.min(value);
                max = max.max(value);
            }
        }

        (min, max)
    }
}

impl<F> ScalarField for SampledField<F>
where
    F: Fn(f64, f64) -> f64,
{
    fn apply(&self, x: f64, y: f64) -> f64 {
        (self.function)(x, y)
    }

    fn min(&self, domain: &DomainRect) -> f64 {
        self.extrema(domain).0
    }

    fn max(&self, domain: &DomainRect) -> f64 {
        self.extrema(domain).1
    }
}

/// The plane `f(x, y) = p*x + q*y + r`, with exact extrema at the corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearField {
    pub p: f64,
    pub q: f64,
    pub r: f64,
}

impl LinearField {
    pub fn new(p: f64, q: f64, r: f64) -> Self {
        Self { p, q, r }
    }

    fn corners(&self, domain: &DomainRect) -> [f64; 4] {
        [
            self.apply(domain.a(), domain.c()),
            self.apply(domain.b(), domain.c()),
            self.apply(domain.a(), domain.d()),
            self.apply(domain.b(), domain.d()),
        ]
    }
}

impl ScalarField for LinearField {
    fn apply(&self, x: f64, y: f64) -> f64 {
        self.p * x + self.q * y + self.r
    }

    fn min(&self, domain: &DomainRect) -> f64 {
        self.corners(domain).into_iter().fold(f64::INFINITY, f64::min)
    }

    fn max(&self, domain: &DomainRect) -> f64 {
        self.corners(domain).into_iter().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> DomainRect {
        DomainRect::new(0.0, 1.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn test_linear_field_extrema() {
        let field = LinearField::new(1.0, -2.0, 3.0);
        let domain = unit_square();
        assert_eq!(field.min(&domain), 1.0);
        assert_eq!(field.max(&domain), 4.0);
    }

    #[test]
    fn test_sampled_field_hits_corners() {
        let field = SampledField::new(|x, y| x * y).with_samples(5);
        let domain = DomainRect::new(-1.0, 2.0, -1.0, 3.0).unwrap();
        assert_eq!(field.min(&domain), -3.0);
        assert_eq!(field.max(&domain), 6.0);
    }

    #[test]
    fn test_sampled_field_interior_peak() {
        let field = SampledField::new(|x: f64, y: f64| -(x - 0.5).powi(2) - (y - 0.5).powi(2));
        let domain = unit_square();
        assert!(field.max(&domain).abs() < 1e-4);
        assert!((field.min(&domain) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_boxed_field() {
        let field: Box<dyn ScalarField> = Box::new(LinearField::new(1.0, 1.0, 0.0));
        assert_eq!(field.apply(2.0, 3.0), 5.0);
        assert_eq!(field.max(&unit_square()), 2.0);
    }
}
