use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

use crate::dataset::Dataset;

const PARTICLE_COUNT: usize = 15;
/// Particles move one step per frame of this length.
const FRAME: Duration = Duration::from_millis(50);

/// A kana drifting across the screen. Positions are percentages of the
/// drawing area so the field survives terminal resizes.
#[derive(Debug, Clone)]
pub struct DriftParticle {
    pub x: f64,
    pub y: f64,
    pub symbol: String,
    pub speed: f64,
    pub direction: f64,
}

impl DriftParticle {
    fn random<R: Rng>(rng: &mut R, symbol: String) -> Self {
        Self {
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..100.0),
            symbol,
            speed: rng.gen_range(0.1..0.3),
            direction: rng.gen_range(0.0..TAU),
        }
    }

    fn step(&mut self) {
        self.x = (self.x + self.direction.cos() * self.speed).rem_euclid(100.0);
        self.y = (self.y + self.direction.sin() * self.speed).rem_euclid(100.0);
    }

    /// Cell position inside a `width` x `height` area.
    pub fn cell(&self, width: u16, height: u16) -> (u16, u16) {
        let col = (self.x / 100.0 * width as f64) as u16;
        let row = (self.y / 100.0 * height as f64) as u16;
        (col.min(width.saturating_sub(1)), row.min(height.saturating_sub(1)))
    }
}

/// Field of drifting kana drawn behind the quiz.
#[derive(Debug, Default)]
pub struct Backdrop {
    pub particles: Vec<DriftParticle>,
    pending: Duration,
}

impl Backdrop {
    pub fn new(dataset: &Dataset) -> Self {
        Self::with_rng(dataset, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(dataset: &Dataset, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(PARTICLE_COUNT);
        for _ in 0..PARTICLE_COUNT {
            if let Some(entry) = dataset.all().choose(rng) {
                particles.push(DriftParticle::random(rng, entry.symbol.clone()));
            }
        }
        Self {
            particles,
            pending: Duration::ZERO,
        }
    }

    /// Advances the animation by whole frames contained in `elapsed`.
    pub fn update(&mut self, elapsed: Duration) {
        self.pending += elapsed;
        while self.pending >= FRAME {
            self.pending -= FRAME;
            for particle in &mut self.particles {
                particle.step();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn backdrop() -> Backdrop {
        let dataset = Dataset::hiragana().unwrap();
        Backdrop::with_rng(&dataset, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_backdrop_spawns_dataset_symbols() {
        let dataset = Dataset::hiragana().unwrap();
        let backdrop = backdrop();
        assert_eq!(backdrop.particles.len(), PARTICLE_COUNT);
        for p in &backdrop.particles {
            assert!(dataset.get(&p.symbol).is_some());
            assert!((0.1..0.3).contains(&p.speed));
        }
    }

    #[test]
    fn test_particles_move_per_frame() {
        let mut backdrop = backdrop();
        let before: Vec<(f64, f64)> = backdrop.particles.iter().map(|p| (p.x, p.y)).collect();

        // less than a frame: nothing moves
        backdrop.update(Duration::from_millis(30));
        let unchanged = backdrop
            .particles
            .iter()
            .zip(&before)
            .all(|(p, &(x, y))| p.x == x && p.y == y);
        assert!(unchanged);

        backdrop.update(Duration::from_millis(30));
        let moved = backdrop
            .particles
            .iter()
            .zip(&before)
            .filter(|(p, &(x, y))| (p.x - x).abs() > 1e-9 || (p.y - y).abs() > 1e-9)
            .count();
        assert!(moved > 0, "particles should drift after a frame");
    }

    #[test]
    fn test_particles_wrap_around() {
        let mut particle = DriftParticle {
            x: 99.95,
            y: 0.05,
            symbol: "あ".to_string(),
            speed: 0.2,
            direction: -std::f64::consts::FRAC_PI_4,
        };
        particle.step();
        assert!(particle.x < 1.0);
        assert!(particle.y > 99.0);
    }

    #[test]
    fn test_cell_stays_inside_area() {
        let particle = DriftParticle {
            x: 99.999,
            y: 99.999,
            symbol: "あ".to_string(),
            speed: 0.1,
            direction: 0.0,
        };
        assert_eq!(particle.cell(80, 24), (79, 23));
        assert_eq!(particle.cell(0, 0), (0, 0));
    }
}
