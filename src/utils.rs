//! Assorted helpers shared by the algorithm families.

use std::fmt::Display;
use std::time::Duration;

use crate::registry::Family;

/// Auto-advance period used for a family when none is configured.
///
/// Slower families have more to look at per step (graphs redraw the whole
/// frontier), so they get longer periods.
#[inline]
pub fn default_period(family: Family) -> Duration {
    let millis = match family {
        Family::Sorting => 700,
        Family::Graph => 1500,
        Family::Searching
        | Family::DivideAndConquer
        | Family::DynamicProgramming
        | Family::Greedy => 1000,
    };
    Duration::from_millis(millis)
}

/// Render `[a, b, c]` for narrations.
pub fn bracketed<T: Display>(values: &[T]) -> String {
    format!("[{}]", joined(values, ", "))
}

/// Join values with a separator.
pub fn joined<T: Display>(values: &[T], sep: &str) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&v.to_string());
    }
    out
}

/// Integer square root, rounded down.
pub fn isqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    let mut x = (n as f64).sqrt() as usize;
    // Correct float rounding at the edges.
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_match_family_pace() {
        assert_eq!(default_period(Family::Sorting), Duration::from_millis(700));
        assert_eq!(default_period(Family::Graph), Duration::from_millis(1500));
        assert_eq!(default_period(Family::Greedy), Duration::from_secs(1));
    }

    #[test]
    fn bracketed_formatting() {
        assert_eq!(bracketed::<i64>(&[]), "[]");
        assert_eq!(bracketed(&[1, 2, 3]), "[1, 2, 3]");
        assert_eq!(joined(&[0, 1, 2], " → "), "0 → 1 → 2");
    }

    #[test]
    fn isqrt_floor_behavior() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(10), 3);
        assert_eq!(isqrt(99), 9);
        assert_eq!(isqrt(100), 10);
    }

    #[test]
    fn isqrt_monotonic_non_decreasing() {
        let mut prev = 0;
        for n in 0..2_000 {
            let r = isqrt(n);
            assert!(r >= prev, "isqrt decreased at n={n}: {r} < {prev}");
            assert!(r * r <= n && (r + 1) * (r + 1) > n);
            prev = r;
        }
    }
}
