//! Mutual-pair repair by cycle merging.
//!
//! Exchanging the receivers of two givers in different cycles merges those
//! cycles into one whose length is the sum of both. Merging a 2-cycle with
//! any other cycle therefore removes it without creating a new one.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::model::ConstraintModel;
use crate::permutation::mutual_pairs;

/// Merges mutual pairs into other cycles until none remain or no allowed
/// exchange exists. Returns the number of merges performed.
///
/// `perm` must be a valid assignment on entry and stays one on exit.
pub fn repair_mutual_pairs<R: Rng + ?Sized>(
    model: &ConstraintModel,
    perm: &mut [usize],
    rng: &mut R,
) -> usize {
    let mut repairs = 0;

    loop {
        let mut pairs = mutual_pairs(perm);
        if pairs.is_empty() {
            return repairs;
        }
        pairs.shuffle(rng);

        let mut progressed = false;
        for (a, b) in pairs {
            // An earlier merge this round may already have absorbed the pair.
            if perm[a] != b || perm[b] != a {
                continue;
            }
            if merge(model, perm, a, b, rng) {
                repairs += 1;
                progressed = true;
            }
        }

        if !progressed {
            return repairs;
        }
    }
}

fn merge<R: Rng + ?Sized>(
    model: &ConstraintModel,
    perm: &mut [usize],
    a: usize,
    b: usize,
    rng: &mut R,
) -> bool {
    let mut others: Vec<usize> = (0..perm.len()).filter(|&y| y != a && y != b).collect();
    others.shuffle(rng);

    for x in [a, b] {
        for &y in &others {
            let (x_receiver, y_receiver) = (perm[x], perm[y]);
            if model.is_allowed(x, y_receiver) && model.is_allowed(y, x_receiver) {
                trace!(x, y, "Merged mutual pair into another cycle");
                perm[x] = y_receiver;
                perm[y] = x_receiver;
                return true;
            }
        }
    }
    false
}
