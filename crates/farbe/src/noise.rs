//! Seeded 2-D simplex noise
//!
//! Stefan Gustavson's formulation of Perlin's simplex noise. The
//! permutation table is shuffled from a [`SeededRandom`], so the field is
//! a pure function of the seed.

use crate::random::SeededRandom;

const GRAD3: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// A 2-D simplex noise field with output in about `[-1, 1]`.
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Build the permutation table from `random`. Consumes 255 draws.
    pub fn new(random: &mut SeededRandom) -> Self {
        let mut table: [u8; 256] = [0; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        random.shuffle(&mut table);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    pub fn noise2d(&self, xin: f64, yin: f64) -> f64 {
        let f2 = 0.5 * (3f64.sqrt() - 1.0);
        let g2 = (3.0 - 3f64.sqrt()) / 6.0;

        let s = (xin + yin) * f2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let t = (i + j) * g2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        // which of the two triangles of the skewed cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = (i as i64).rem_euclid(256) as usize;
        let jj = (j as i64).rem_euclid(256) as usize;
        let p = &self.perm;
        let gi0 = p[ii + p[jj] as usize] as usize % 12;
        let gi1 = p[ii + i1 + p[jj + j1] as usize] as usize % 12;
        let gi2 = p[ii + 1 + p[jj + 1] as usize] as usize % 12;

        let corner = |gi: usize, x: f64, y: f64| {
            let t = 0.5 - x * x - y * y;
            if t < 0.0 {
                0.0
            } else {
                let t2 = t * t;
                t2 * t2 * (GRAD3[gi][0] * x + GRAD3[gi][1] * y)
            }
        };

        70.0 * (corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_seeded() {
        let a = SimplexNoise::new(&mut SeededRandom::new("noise"));
        let b = SimplexNoise::new(&mut SeededRandom::new("noise"));
        let c = SimplexNoise::new(&mut SeededRandom::new("other"));

        let samples = |n: &SimplexNoise| -> Vec<f64> {
            (0..20).map(|k| n.noise2d(k as f64 * 0.37, k as f64 * 0.11)).collect()
        };
        assert_eq!(samples(&a), samples(&b));
        assert_ne!(samples(&a), samples(&c));
    }

    #[test]
    fn test_noise_range() {
        let noise = SimplexNoise::new(&mut SeededRandom::new("range"));
        for x in -20..20 {
            for y in -20..20 {
                let v = noise.noise2d(x as f64 * 0.23, y as f64 * 0.31);
                assert!((-1.0..=1.0).contains(&v), "noise({x}, {y}) = {v}");
            }
        }
    }

    #[test]
    fn test_noise_is_zero_at_lattice_origin() {
        let noise = SimplexNoise::new(&mut SeededRandom::new("zero"));
        assert_eq!(noise.noise2d(0.0, 0.0), 0.0);
    }
}
