//! Domain-specific assertion macros for staylens harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! listing or rejection bucket was off.

/// Assert two floats agree to within `1e-9` (or an explicit tolerance).
///
/// ```rust
/// assert_close!(report.kpis.avg_rating.unwrap(), 4.15);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {
        $crate::assert_close!($actual, $expected, 1e-9)
    };
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        if (actual - expected).abs() > $tol {
            panic!(
                "assert_close! failed:\n  expected: {}\n  actual:   {}\n  tolerance: {}",
                expected, actual, $tol
            );
        }
    }};
}

/// Assert a `NormalizeReport` counted `$count` rejections for `$reason`.
///
/// ```rust
/// assert_rejected!(dataset.report(), Rejection::Rating, 1);
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($report:expr, $reason:expr, $count:expr) => {{
        let report: &staylens_core::NormalizeReport = &$report;
        let reason: staylens_core::Rejection = $reason;
        let actual = report.rejected.get(&reason).copied().unwrap_or(0);
        if actual != $count {
            panic!(
                "assert_rejected! failed for {}:\n  expected: {}\n  actual:   {}\n  all rejections: {:?}",
                reason, $count, actual, report.rejected
            );
        }
    }};
}

/// Assert the kept listings' names, in order.
///
/// ```rust
/// assert_names!(dataset.records(), ["Hotel Sunshine", "Townhouse 212"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($records:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "kept listing names differ");
    }};
}
