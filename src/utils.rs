/// [Szudzik pairing function][szudzik-pairing].
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// Arithmetic wraps, so the result is a hash rather than a bijection once
/// `max(a, b)` exceeds `2^32`.
///
/// [szudzik-pairing]: http://szudzik.com/ElegantPairing.pdf
pub fn pairing_szudzik(a: u64, b: u64) -> u64 {
    if a < b {
        b.wrapping_mul(b).wrapping_add(a)
    } else {
        a.wrapping_mul(a).wrapping_add(a).wrapping_add(b)
    }
}

/// Mixes the bits of `x` (the `splitmix64` finalizer).
pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

pub trait MyHash {
    /// Hash used to pick a cache slot.
    fn hash(&self) -> u64;
}

/// `ln(1 - p)`, accurate for small `p`; `-inf` at `p = 1`.
pub fn ln_one_minus(p: f64) -> f64 {
    (-p).ln_1p()
}

/// Number of unordered vertex pairs, `C(n, 2)`.
pub fn num_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
