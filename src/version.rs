//! Total order over version strings
//!
//! Versions are dot-separated non-negative integers ("3.4.1"). Comparison
//! is numeric, component by component, with missing trailing components
//! treated as 0 and non-numeric components parsed as 0 (never an error).
//!
//! When all numeric components compare equal, the shorter string sorts
//! first: "1.0" < "1.0.0". This tie-break looks odd but is load-bearing;
//! it keeps the ordering of released versions total and stable, and both
//! the resolver and the apply path depend on it. Preserve it exactly.
//!
//! `None` (no installed version) sorts before any real version.

use std::cmp::Ordering;

/// Compare two optional version strings, `None` first.
pub fn cmp_versions(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp_version_strs(a, b),
    }
}

/// Compare two version strings.
pub fn cmp_version_strs(a: &str, b: &str) -> Ordering {
    let av: Vec<u64> = a.split('.').map(component).collect();
    let bv: Vec<u64> = b.split('.').map(component).collect();

    let n = av.len().max(bv.len());
    for i in 0..n {
        let ai = av.get(i).copied().unwrap_or(0);
        let bi = bv.get(i).copied().unwrap_or(0);
        match ai.cmp(&bi) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }

    // Numeric tie: shorter string first ("1.0" < "1.0.0")
    a.len().cmp(&b.len())
}

/// True when `candidate` is strictly newer than `current`.
pub fn is_newer(candidate: &str, current: Option<&str>) -> bool {
    cmp_versions(Some(candidate), current) == Ordering::Greater
}

fn component(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}
