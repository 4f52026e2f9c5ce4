//! Seeded random source. The only randomness the engine ever consumes.
//!
//! Every draw is a pure function of the seed and the number of draws before it.
//! The transforms below take their uniforms in a fixed order; changing that order
//! changes every battle replayed from a seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::CEP_TO_SIGMA;
use skirmish_core::types::Position;

/// Wraps a ChaCha8 stream seeded from a 32-bit battle seed.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    seed: u32,
    inner: ChaCha8Rng,
}

impl DeterministicRng {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(u64::from(seed)),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// True with probability `p`. `p <= 0` never succeeds, `p >= 1` always does.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform float in [a, b).
    pub fn uniform(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.unit()
    }

    /// Normal draw via Box–Muller. Consumes two uniforms.
    pub fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        let u1 = self.unit();
        let u2 = self.unit();
        mean + stddev * box_muller(u1, u2)
    }

    /// Rayleigh-distributed radius with scale `sigma`. Consumes one uniform.
    pub fn rayleigh(&mut self, sigma: f64) -> f64 {
        let u = self.unit();
        rayleigh_radius(sigma, u)
    }

    /// Scatter a round around `aim` for a weapon with the given CEP.
    ///
    /// Draws the radius first, then the bearing.
    pub fn scatter(&mut self, aim: Position, cep_m: f64) -> Scatter {
        let radius = self.rayleigh(cep_m / CEP_TO_SIGMA);
        let angle = self.uniform(0.0, std::f64::consts::TAU);
        scatter_point(aim, radius, angle)
    }
}

/// Result of a [`DeterministicRng::scatter`] draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    pub point: Position,
    pub miss_distance_m: f64,
}

/// Standard normal from two uniforms in [0, 1). Uses `1 - u1` so the log never sees 0.
pub fn box_muller(u1: f64, u2: f64) -> f64 {
    let r = (-2.0 * (1.0 - u1).ln()).sqrt();
    let z = r * (std::f64::consts::TAU * u2).cos();
    if z.is_finite() {
        z
    } else {
        0.0
    }
}

/// Inverse-CDF Rayleigh radius for a uniform in [0, 1).
pub fn rayleigh_radius(sigma: f64, u: f64) -> f64 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0.0;
    }
    let r = sigma * (-2.0 * (1.0 - u).ln()).sqrt();
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Offset `aim` by polar `(radius, angle)`. Falls back to the aim point on non-finite input.
pub fn scatter_point(aim: Position, radius: f64, angle: f64) -> Scatter {
    let point = aim + Position::new(angle.cos(), angle.sin()) * radius;
    if point.is_finite() {
        Scatter {
            point,
            miss_distance_m: radius,
        }
    } else {
        Scatter {
            point: aim,
            miss_distance_m: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.uniform(0.0, 10.0).to_bits(), b.uniform(0.0, 10.0).to_bits());
            assert_eq!(a.normal(1.0, 2.0).to_bits(), b.normal(1.0, 2.0).to_bits());
            assert_eq!(a.bernoulli(0.5), b.bernoulli(0.5));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(2);
        let xs: Vec<f64> = (0..10).map(|_| a.uniform(0.0, 1.0)).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.uniform(0.0, 1.0)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = DeterministicRng::new(3);
        for _ in 0..10_000 {
            let x = rng.uniform(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn test_bernoulli_edges() {
        let mut rng = DeterministicRng::new(4);
        for _ in 0..1000 {
            assert!(!rng.bernoulli(0.0));
            assert!(rng.bernoulli(1.0));
            assert!(!rng.bernoulli(-3.0));
            assert!(rng.bernoulli(2.0));
        }
    }

    #[test]
    fn test_bernoulli_rate() {
        let mut rng = DeterministicRng::new(5);
        let hits = (0..20_000).filter(|_| rng.bernoulli(0.3)).count();
        let rate = hits as f64 / 20_000.0;
        assert!((rate - 0.3).abs() < 0.02, "rate {rate}");
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = DeterministicRng::new(6);
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|_| rng.normal(10.0, 2.0)).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "sd {}", var.sqrt());
    }

    #[test]
    fn test_box_muller_guarded_at_boundaries() {
        assert!(box_muller(0.0, 0.0).is_finite());
        assert!(box_muller(0.999_999_999_999_999_9, 0.5).is_finite());
        assert!(box_muller(0.0, 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_rayleigh_degenerate_sigma() {
        assert_eq!(rayleigh_radius(0.0, 0.5), 0.0);
        assert_eq!(rayleigh_radius(-1.0, 0.5), 0.0);
        assert_eq!(rayleigh_radius(f64::NAN, 0.5), 0.0);
        assert_eq!(rayleigh_radius(f64::INFINITY, 0.5), 0.0);
        assert_eq!(rayleigh_radius(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_scatter_half_inside_cep() {
        let mut rng = DeterministicRng::new(8);
        let aim = Position::new(100.0, 200.0);
        let n = 20_000;
        let inside = (0..n)
            .filter(|_| {
                let s = rng.scatter(aim, 5.0);
                assert!((s.point.distance(aim) - s.miss_distance_m).abs() < 1e-9);
                s.miss_distance_m <= 5.0
            })
            .count();
        let frac = inside as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.02, "fraction inside CEP {frac}");
    }

    #[test]
    fn test_scatter_point_non_finite_falls_back() {
        let aim = Position::new(1.0, 2.0);
        let s = scatter_point(aim, f64::INFINITY, 0.3);
        assert_eq!(s.point, aim);
        assert_eq!(s.miss_distance_m, 0.0);
    }
}
