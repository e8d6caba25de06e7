//! Constant-time secret comparison.

use subtle::{Choice, ConstantTimeEq};

/// Compare a presented credential with the configured secret.
///
/// An empty `expected` never matches, so an unconfigured secret cannot be
/// satisfied by an empty header. Otherwise the comparison always walks the
/// longer of the two inputs, so its duration does not depend on where the
/// first mismatch sits or on how long the presented value is relative to
/// the secret.
pub fn secrets_match(presented: &[u8], expected: &[u8]) -> bool {
    if expected.is_empty() {
        return false;
    }
    compare_counted(presented, expected).0
}

/// Comparison body. Also returns the number of byte steps taken.
fn compare_counted(presented: &[u8], expected: &[u8]) -> (bool, usize) {
    let len = presented.len().max(expected.len());
    let mut equal: Choice = (presented.len() as u64).ct_eq(&(expected.len() as u64));
    let mut steps = 0;

    for i in 0..len {
        let a = presented.get(i).copied().unwrap_or(0);
        let b = expected.get(i).copied().unwrap_or(0);
        equal &= a.ct_eq(&b);
        steps += 1;
    }

    (bool::from(equal), steps)
}
