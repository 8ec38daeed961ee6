//! Prime numbers used as common-factor candidates when reducing fractions.

use once_cell::sync::Lazy;

/// The number of primes tried by default.
pub const DEFAULT_PRIME_COUNT: usize = 100;

/// The first [`DEFAULT_PRIME_COUNT`] primes, in increasing order.
pub static PRIMES: Lazy<Vec<i64>> = Lazy::new(|| first_primes(DEFAULT_PRIME_COUNT));

/// Returns all primes less than or equal to `limit`, using the sieve of Sundaram.
fn sundaram(limit: usize) -> Vec<i64> {
    if limit < 2 {
        return Vec::new();
    }

    // every odd number 2i + 1 <= limit is prime unless i = j + k + 2jk for some 1 <= j <= k
    let k = (limit - 1) / 2;
    let mut composite = vec![false; k + 1];
    for i in 1..=k {
        let mut j = i;
        while i + j + 2 * i * j <= k {
            composite[i + j + 2 * i * j] = true;
            j += 1;
        }
    }

    let mut primes = vec![2];
    primes.extend(
        (1..=k)
            .filter(|&i| !composite[i])
            .map(|i| (2 * i + 1) as i64)
    );
    primes
}

/// Returns the first `count` primes, in increasing order.
pub fn first_primes(count: usize) -> Vec<i64> {
    let mut limit = 16;
    loop {
        let mut primes = sundaram(limit);
        if primes.len() >= count {
            primes.truncate(count);
            return primes;
        }
        limit *= 2;
    }
}
