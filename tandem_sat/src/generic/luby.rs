/*!
The luby sequence, used to schedule restart budgets.

See <https://oeis.org/A182105> for details on the sequence itself: 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, …

[luby] generalises the sequence to an arbitrary base `y`, returning `y^s` where `s` is the exponent the classical sequence would raise 2 to at index `x`.
A restart scheduler, then, obtains the budget of window `k` as `restart_first · luby(restart_inc, k)`.
*/

/// The value `y^s`, where `2^s` is element `x` (zero-indexed) of the luby sequence.
pub fn luby(y: f64, x: u64) -> f64 {
    // Find the finite subsequence containing index x, and the size of that subsequence.
    let mut size: u64 = 1;
    let mut seq: i32 = 0;
    while size < x + 1 {
        seq += 1;
        size = 2 * size + 1;
    }

    let mut x = x;
    while size - 1 != x {
        size = (size - 1) >> 1;
        seq -= 1;
        x %= size;
    }

    y.powi(seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[u64] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32,
    ];

    #[test]
    fn base_two_matches_the_sequence() {
        for (x, known_value) in LUBY_SLICE.iter().enumerate() {
            assert_eq!(luby(2.0, x as u64), *known_value as f64);
        }
    }

    #[test]
    fn other_bases_share_the_exponent() {
        // Element 6 of the sequence is 4 = 2^2.
        assert_eq!(luby(3.0, 6), 9.0);
        // Element 14 is 8 = 2^3.
        assert_eq!(luby(1.5, 14), 1.5_f64.powi(3));
        // Elements of value 1 are base-independent.
        assert_eq!(luby(7.0, 7), 1.0);
    }
}
