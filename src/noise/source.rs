//! Base noise functions sampled by each fractal layer

use ::noise::{NoiseFn, Perlin, Simplex, Worley};

use super::node::NoiseKind;

/// Output band of a base noise function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseRange {
    /// `[-1, 1]`
    Signed,
    /// `[0, 1]`
    Unsigned,
}

impl NoiseRange {
    /// Lowest possible fractal sum given the highest possible one.
    pub fn min_for(self, max: f64) -> f64 {
        match self {
            NoiseRange::Signed => -max,
            NoiseRange::Unsigned => 0.0,
        }
    }
}

/// A 2D noise primitive.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait BaseNoise {
    /// Sample at frequency-scaled coordinates
    fn sample(&self, x: f64, y: f64) -> f64;

    /// Output band, used to derive the lower rescale bound
    fn range(&self) -> NoiseRange;
}

/// Improved Perlin gradient noise, clamped to `[-1, 1]`
pub struct GradientNoise(Perlin);

impl GradientNoise {
    pub fn new(seed: u32) -> Self {
        Self(Perlin::new(seed))
    }
}

impl BaseNoise for GradientNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.0.get([x, y]).clamp(-1.0, 1.0)
    }

    fn range(&self) -> NoiseRange {
        NoiseRange::Signed
    }
}

/// Simplex gradient noise, clamped to `[-1, 1]`
pub struct SimplexNoise(Simplex);

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self(Simplex::new(seed))
    }
}

impl BaseNoise for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.0.get([x, y]).clamp(-1.0, 1.0)
    }

    fn range(&self) -> NoiseRange {
        NoiseRange::Signed
    }
}

/// Worley cell noise remapped into `[0, 1]`
pub struct CellularNoise(Worley);

impl CellularNoise {
    pub fn new(seed: u32) -> Self {
        Self(Worley::new(seed))
    }
}

impl BaseNoise for CellularNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        ((self.0.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    fn range(&self) -> NoiseRange {
        NoiseRange::Unsigned
    }
}

/// Noise that returns the same value everywhere.
///
/// Handy for flat plateaus and offsets inside a tree.
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise {
    pub value: f64,
    pub range: NoiseRange,
}

impl ConstantNoise {
    pub fn new(value: f64, range: NoiseRange) -> Self {
        Self { value, range }
    }
}

impl BaseNoise for ConstantNoise {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.value
    }

    fn range(&self) -> NoiseRange {
        self.range
    }
}

/// Build the base noise for a node kind
pub fn source_for(kind: NoiseKind, seed: u32) -> Box<dyn BaseNoise> {
    match kind {
        NoiseKind::Perlin => Box::new(GradientNoise::new(seed)),
        NoiseKind::Simplex => Box::new(SimplexNoise::new(seed)),
        NoiseKind::Cellular => Box::new(CellularNoise::new(seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: [(f64, f64); 5] = [(0.0, 0.0), (0.37, 1.91), (-4.2, 3.3), (12.5, -7.75), (100.1, 200.2)];

    #[test]
    fn test_min_for() {
        assert_eq!(NoiseRange::Signed.min_for(1.75), -1.75);
        assert_eq!(NoiseRange::Unsigned.min_for(1.75), 0.0);
    }

    #[test]
    fn test_kind_ranges_match_sources() {
        for kind in [NoiseKind::Perlin, NoiseKind::Simplex, NoiseKind::Cellular] {
            assert_eq!(source_for(kind, 7).range(), kind.range());
        }
    }

    #[test]
    fn test_signed_sources_stay_in_band() {
        for source in [source_for(NoiseKind::Perlin, 3), source_for(NoiseKind::Simplex, 3)] {
            for (x, y) in POINTS {
                let v = source.sample(x, y);
                assert!(v.is_finite());
                assert!((-1.0..=1.0).contains(&v), "sample {} out of band", v);
            }
        }
    }

    #[test]
    fn test_cellular_is_unsigned() {
        let source = CellularNoise::new(11);
        for (x, y) in POINTS {
            let v = source.sample(x, y);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_sources_are_deterministic() {
        let a = GradientNoise::new(42);
        let b = GradientNoise::new(42);
        for (x, y) in POINTS {
            assert_eq!(a.sample(x, y), b.sample(x, y));
            assert_eq!(a.sample(x, y), a.sample(x, y));
        }
    }

    #[test]
    fn test_constant_noise() {
        let source = ConstantNoise::new(0.25, NoiseRange::Signed);
        assert_eq!(source.sample(-3.0, 9.0), 0.25);
        assert_eq!(source.range(), NoiseRange::Signed);
    }
}
