/// Largest `k` with `k * k <= n`.
#[must_use]
pub fn integer_sqrt(n: u32) -> u32 {
    let n = u64::from(n);
    let mut k = (n as f64).sqrt() as u64;

    // Correct any rounding from the float estimate.
    while k * k > n {
        k -= 1;
    }
    while (k + 1) * (k + 1) <= n {
        k += 1;
    }

    k as u32
}

/// Side length of the perfect square closest to `n`, never 0.
///
/// The midpoint between `k²` and `(k+1)²` is `k² + k + ½`, so integers never
/// tie and the rounding direction is unambiguous.
#[must_use]
pub fn nearest_square_side(n: u32) -> u32 {
    let low = u64::from(integer_sqrt(n));
    let high = low + 1;
    let n = u64::from(n);

    let side = if n - low * low <= high * high - n { low } else { high };
    side.max(1) as u32
}

#[must_use]
pub fn nearest_perfect_square(n: u32) -> u32 {
    // 65_536² does not fit in a u32.
    let side = nearest_square_side(n).min(u32::from(u16::MAX));
    side * side
}

#[must_use]
pub fn is_perfect_square(n: u32) -> bool {
    let k = integer_sqrt(n);
    k * k == n
}
