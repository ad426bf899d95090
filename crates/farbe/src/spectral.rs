//! Paint-like subtractive mixing
//!
//! A color is read as a reflectance curve sampled every 10 nm from 380 to
//! 750 nm. The curve is a combination of seven basis curves (white, the
//! three secondaries and the three primaries), weighted by the usual
//! white/secondary/primary decomposition of the color's linear RGB. Each
//! basis curve is the smoothest reflectance in `[0, 1]` whose D65 color is
//! its sRGB counterpart, so a decomposed color maps back onto itself.
//!
//! At every sample the reflectance converts to a Kubelka-Munk ratio
//! `K/S = (1 - R)^2 / 2R`. Ratios mix linearly by concentration, the mixed
//! curve converts back to reflectance, and the colour-matching functions
//! take it to XYZ and on to sRGB. Concentrations are weighted by each
//! color's luminance and the square of its share, so a dark pigment does
//! not swamp a light one.

use crate::color::{Color, LinearRgb, Srgb};

const SAMPLES: usize = 38;

/// Reflectances are floored here so pure black has a finite `K/S`.
const MIN_REFLECTANCE: f64 = 1e-8;
/// Luminance floor for the concentration weights.
const MIN_LUMINANCE: f64 = 1e-8;

const WHITE: [f64; SAMPLES] = [1.0; SAMPLES];

const CYAN: [f64; SAMPLES] = [
    0.82661961, 0.84810697, 0.87003425, 0.89333497, 0.91936378, 0.94737936, 0.97327948,
    0.99309521, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.97298948, 0.80528094,
    0.53015395, 0.24998588, 0.062016201, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00043249094,
    0.0016792043, 0.0034421198, 0.0054267544, 0.0074783939, 0.0095308352, 0.011571121,
];

const MAGENTA: [f64; SAMPLES] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.99305766, 0.89843025, 0.70999705, 0.4699125,
    0.23937329, 0.073385206, 0.0, 0.0, 0.0, 0.0, 0.026461066, 0.12744532, 0.30083177,
    0.5133755, 0.71953884, 0.87901266, 0.97060646, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    0.99983713, 0.99955658, 0.9992211, 0.99886659, 0.99850947, 0.99815396,
];

const YELLOW: [f64; SAMPLES] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.010368861, 0.063577081, 0.17050042, 0.32305155,
    0.50057241, 0.67713188, 0.82779894, 0.9338417, 0.98808323, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    0.99675013, 0.98815971, 0.97552582, 0.96106416, 0.94658292, 0.9331021, 0.92094773,
    0.91004759, 0.90017185, 0.89107863, 0.88257164, 0.87450129, 0.86675355, 0.85923667,
    0.85186919, 0.8445752,
];

const RED: [f64; SAMPLES] = [
    0.17338018, 0.15189286, 0.12996562, 0.10666494, 0.080636178, 0.052620638, 0.026720549,
    0.0069048238, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.027010786,
    0.1947193, 0.46984601, 0.75001383, 0.93798354, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    0.99956749, 0.99832074, 0.99655777, 0.99457308, 0.99252139, 0.99046889, 0.98842854,
];

const GREEN: [f64; SAMPLES] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0069423121, 0.10156974, 0.29000299, 0.5300876,
    0.76062682, 0.92661487, 1.0, 1.0, 1.0, 1.0, 0.97353899, 0.87255476, 0.69916827, 0.48662447,
    0.28046107, 0.12098724, 0.029393484, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.00016285581,
    0.00044337474, 0.00077881009, 0.0011332749, 0.0014903523, 0.0018458106,
];

const BLUE: [f64; SAMPLES] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.98963113, 0.93642291, 0.82949958, 0.67694847,
    0.49942765, 0.32286821, 0.17220115, 0.066158379, 0.011916804, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0032498906, 0.011840327, 0.024474215, 0.038935826, 0.053416981, 0.066897691, 0.079051909,
    0.089951886, 0.099827431, 0.10892045, 0.11742724, 0.12549737, 0.1332449, 0.14076157,
    0.14812882, 0.15542261,
];

/// CIE 1931 colour-matching functions weighted by D65, normalized to the
/// D65 white point (`x̄`, `ȳ`, `z̄`).
const CMF: [[f64; SAMPLES]; 3] = [
    [
        0.0000094, 0.00009521, 0.00090401665, 0.0042408665, 0.012432936, 0.022401261,
        0.035577036, 0.038052083, 0.031326737, 0.020815805, 0.011028439, 0.0032699537,
        0.00023313006, 0.0016873609, 0.0069444767, 0.016293533, 0.027953809, 0.042736228,
        0.057074937, 0.070466974, 0.083434186, 0.085681538, 0.089924676, 0.084803317,
        0.070862516, 0.051775827, 0.036073163, 0.021549841, 0.012160749, 0.0063295768,
        0.0027535177, 0.0010105531, 0.00038543242, 0.00013391721, 0.00003346, 0.00001032,
        0.00000271, 0.00000051,
    ],
    [
        0.00001175, 0.00002963, 0.00009888, 0.00023020942, 0.00047304338, 0.00084382926,
        0.0018755276, 0.0036743868, 0.0062085412, 0.0097283662, 0.015233968, 0.0218657,
        0.033863616, 0.050972931, 0.070036198, 0.088492646, 0.094222485, 0.097886573,
        0.093775447, 0.086608188, 0.079058861, 0.06400766, 0.05402165, 0.042433334,
        0.031024776, 0.02079353, 0.013910429, 0.0083433746, 0.0049395943, 0.0028174399,
        0.0014025986, 0.00061508344, 0.00029267772, 0.00013245516, 0.00004501, 0.0000197,
        0.00000768, 0.00000222,
    ],
    [
        0.00031905639, 0.0010634691, 0.0047604172, 0.017670745, 0.057660245, 0.11370134,
        0.17207507, 0.19725942, 0.18634124, 0.1407681, 0.088879212, 0.048019194, 0.028087163,
        0.015961896, 0.0084635556, 0.0044089091, 0.0020067092, 0.00086910428, 0.00033605267,
        0.00012056912, 0.00004134, 0.00001222, 0.00000366, 0.000001, 0.00000025, 0.00000006,
        0.00000001, 0., 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
];

/// XYZ (D65) to linear sRGB.
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

fn reflectance(color: LinearRgb) -> [f64; SAMPLES] {
    let w = color.r.min(color.g).min(color.b);
    let (r, g, b) = (color.r - w, color.g - w, color.b - w);

    let c = g.min(b);
    let m = r.min(b);
    let y = r.min(g);
    let red = (r - b).min(r - g).max(0.0);
    let green = (g - b).min(g - r).max(0.0);
    let blue = (b - g).min(b - r).max(0.0);

    std::array::from_fn(|i| {
        let value = w * WHITE[i]
            + c * CYAN[i]
            + m * MAGENTA[i]
            + y * YELLOW[i]
            + red * RED[i]
            + green * GREEN[i]
            + blue * BLUE[i];
        value.max(MIN_REFLECTANCE)
    })
}

fn reflectance_to_rgb(curve: &[f64; SAMPLES]) -> LinearRgb {
    let xyz: [f64; 3] =
        std::array::from_fn(|k| CMF[k].iter().zip(curve).map(|(w, r)| w * r).sum());
    let [r, g, b]: [f64; 3] = std::array::from_fn(|row| {
        let m = XYZ_TO_RGB[row];
        (m[0] * xyz[0] + m[1] * xyz[1] + m[2] * xyz[2]).clamp(0.0, 1.0)
    });
    LinearRgb::new(r, g, b)
}

fn reflectance_to_ks(r: f64) -> f64 {
    let r = r.clamp(MIN_REFLECTANCE, 1.0);
    (1.0 - r) * (1.0 - r) / (2.0 * r)
}

fn ks_to_reflectance(ks: f64) -> f64 {
    // 1 + ks - sqrt(ks^2 + 2ks), rearranged to avoid cancellation
    1.0 / (1.0 + ks + (ks * (ks + 2.0)).sqrt())
}

/// Mix `a` and `b` with `t` as the share of `b`.
///
/// `t <= 0` returns `a` and `t >= 1` returns `b` exactly.
pub fn mix(a: Color, b: Color, t: f64) -> Color {
    if t.is_nan() || t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }

    let la = LinearRgb::from(a);
    let lb = LinearRgb::from(b);

    let ya = la.luminance().max(MIN_LUMINANCE);
    let yb = lb.luminance().max(MIN_LUMINANCE);
    let wa = ya * (1.0 - t) * (1.0 - t);
    let wb = yb * t * t;
    let w = wb / (wa + wb);

    let ra = reflectance(la);
    let rb = reflectance(lb);
    let mixed: [f64; SAMPLES] = std::array::from_fn(|i| {
        let ks = (1.0 - w) * reflectance_to_ks(ra[i]) + w * reflectance_to_ks(rb[i]);
        ks_to_reflectance(ks)
    });

    Srgb::from(reflectance_to_rgb(&mixed)).to_color()
}

/// Stretch `seeds` into exactly `amount` waypoints by spectral mixing.
///
/// With `N` seeds and `N - 1` gaps, each gap contributes
/// `floor(gap_length)` mixes at ratios `j / gap_length`, where
/// `gap_length = (amount - 2) / (N - 1) + 1`. The sequence starts with the
/// first seed, is cut or padded (repeating its last entry) to
/// `amount - 1` entries, and ends with the last seed.
///
/// Seeds are returned unchanged when there are at least `amount` of them.
/// A single seed fills every slot; no seeds give no waypoints.
///
/// # Example
///
/// ```
/// use farbe::{spectral_waypoints, Color};
///
/// let seeds = [Color::new(32, 33, 36), Color::WHITE, Color::new(255, 0, 0)];
/// let waypoints = spectral_waypoints(&seeds, 6);
/// assert_eq!(waypoints.len(), 6);
/// assert_eq!(waypoints[0], seeds[0]);
/// assert_eq!(waypoints[5], seeds[2]);
/// ```
pub fn spectral_waypoints(seeds: &[Color], amount: usize) -> Vec<Color> {
    let (first, last) = match (seeds.first(), seeds.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };
    if seeds.len() >= amount {
        return seeds.to_vec();
    }

    let gaps = seeds.len() - 1;
    let spacing = if gaps > 0 {
        amount.saturating_sub(2) as f64 / gaps as f64
    } else {
        0.0
    };
    let gap_length = spacing + 1.0;
    let mixes_per_gap = gap_length.floor() as usize;

    let mut waypoints = Vec::with_capacity(amount);
    waypoints.push(first);
    for pair in seeds.windows(2) {
        for j in 1..=mixes_per_gap {
            waypoints.push(mix(pair[0], pair[1], j as f64 / gap_length));
        }
    }

    let body = amount.saturating_sub(1);
    waypoints.truncate(body);
    while waypoints.len() < body {
        let fill = waypoints.last().copied().unwrap_or(first);
        waypoints.push(fill);
    }
    if amount > 0 {
        waypoints.push(last);
    }
    waypoints
}
