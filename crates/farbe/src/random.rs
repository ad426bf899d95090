//! Deterministic seeded random stream
//!
//! [`SeededRandom`] is an ARC4 keystream turned into doubles with 52 bits
//! of significance. The construction is the one popularized by David
//! Bau's `seedrandom`, so a seed string yields the same sequence of numbers
//! as that package does. The generators consuming the stream are separate
//! algorithms, so equal streams do not imply equal colors.
//!
//! The stream depends only on the seed string: no global state, no
//! entropy pool, identical output on every platform.

const WIDTH: usize = 256;
const MASK: usize = WIDTH - 1;
/// Bytes drawn per double before refinement.
const CHUNKS: u32 = 6;
// 2^48, 2^52 and 2^53
const START_DENOM: f64 = 281_474_976_710_656.0;
const SIGNIFICANCE: f64 = 4_503_599_627_370_496.0;
const OVERFLOW: f64 = 9_007_199_254_740_992.0;

/// Mix the UTF-16 code units of `seed` into a key of at most 256 bytes.
fn mix_key(seed: &str) -> Vec<u8> {
    let mut key: Vec<u8> = Vec::new();
    let mut smear: u32 = 0;
    for (j, unit) in seed.encode_utf16().enumerate() {
        let slot = j & MASK;
        if slot >= key.len() {
            key.push(0);
        }
        smear ^= key[slot] as u32 * 19;
        key[slot] = (smear.wrapping_add(unit as u32) & MASK as u32) as u8;
    }
    key
}

/// The ARC4 keystream generator.
#[derive(Clone)]
struct Arc4 {
    i: usize,
    j: usize,
    s: [u8; WIDTH],
}

impl Arc4 {
    fn new(key: &[u8]) -> Self {
        let key: &[u8] = if key.is_empty() { &[0] } else { key };

        let mut s = [0u8; WIDTH];
        for (i, slot) in s.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut j = 0usize;
        for i in 0..WIDTH {
            let t = s[i];
            j = (j + key[i % key.len()] as usize + t as usize) & MASK;
            s[i] = s[j];
            s[j] = t;
        }

        let mut arc4 = Self { i: 0, j: 0, s };
        // RC4-drop[256]
        arc4.next_bytes(WIDTH as u32);
        arc4
    }

    /// Next `count` keystream bytes as a big-endian number.
    fn next_bytes(&mut self, count: u32) -> f64 {
        let mut r = 0.0;
        for _ in 0..count {
            self.i = (self.i + 1) & MASK;
            let t = self.s[self.i];
            self.j = (self.j + t as usize) & MASK;
            self.s[self.i] = self.s[self.j];
            self.s[self.j] = t;
            let out = self.s[(self.s[self.i] as usize + t as usize) & MASK];
            r = r * WIDTH as f64 + out as f64;
        }
        r
    }
}

/// A seeded stream of doubles in `[0, 1)`.
///
/// # Example
///
/// ```
/// use farbe::SeededRandom;
///
/// let mut a = SeededRandom::new("sunset");
/// let mut b = SeededRandom::new("sunset");
/// assert_eq!(a.next_f64(), b.next_f64());
///
/// let die = a.int_range(1, 6);
/// assert!((1..=6).contains(&die));
/// ```
#[derive(Clone)]
pub struct SeededRandom {
    seed: String,
    arc4: Arc4,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            arc4: Arc4::new(&mix_key(seed)),
        }
    }

    /// Replace the whole state with a fresh stream for `seed`.
    pub fn reseed(&mut self, seed: &str) {
        *self = Self::new(seed);
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Next double in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let mut n = self.arc4.next_bytes(CHUNKS);
        let mut d = START_DENOM;
        let mut x = 0.0;
        while n < SIGNIFICANCE {
            n = (n + x) * WIDTH as f64;
            d *= WIDTH as f64;
            x = self.arc4.next_bytes(1);
        }
        while n >= OVERFLOW {
            n /= 2.0;
            d /= 2.0;
            // x is a single byte here, so this is an exact integer shift
            x = ((x as u32) >> 1) as f64;
        }
        (n + x) / d
    }

    /// `next_f64() * factor`.
    #[inline]
    pub fn scaled(&mut self, factor: f64) -> f64 {
        self.next_f64() * factor
    }

    /// Uniform integer in `min..=max`, computed as
    /// `floor(next * (max - min + 1)) + min`.
    #[inline]
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        (self.next_f64() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// The two-form draw used by the generators.
    ///
    /// With no `max` (or a `max` of zero) this is [`scaled`](Self::scaled)
    /// by `min`; otherwise it is [`int_range`](Self::int_range). Both forms
    /// consume exactly one double.
    pub fn next(&mut self, min: f64, max: Option<f64>) -> f64 {
        match max {
            Some(max) if max != 0.0 => {
                (self.next_f64() * (max - min + 1.0)).floor() + min
            }
            _ => self.scaled(min),
        }
    }

    /// Index in `0..len`; `None` for an empty range.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(((self.next_f64() * len as f64) as usize).min(len - 1))
    }

    /// Fisher-Yates shuffle drawing from this stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = ((self.next_f64() * (i + 1) as f64) as usize).min(i);
            items.swap(i, j);
        }
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededRandom")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
