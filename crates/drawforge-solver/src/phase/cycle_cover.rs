//! Exact search for an assignment without mutual pairs.
//!
//! Exclusions and couples are symmetric, so an assignment without mutual
//! pairs is a set of cycles of length three or more covering everyone. In
//! the undirected graph of allowed pairs that is a 2-factor: every
//! participant uses exactly two allowed pairs, one to give and one to
//! receive. Whether a 2-factor exists is decided by a perfect matching on
//! a gadget graph, found with Edmonds' blossom algorithm.
//!
//! Gadget layout: participant `v` owns two ports, `2v` and `2v + 1`. Allowed
//! pair `k = {u, v}` owns two pair vertices `x` and `y = x + 1`, joined to
//! each other, with `x` joined to both ports of `u` and `y` to both ports of
//! `v`. Matching `x` with `y` leaves the pair unused; matching both to ports
//! uses it. Since every port is matched exactly once, every participant ends
//! up in exactly two used pairs.

use std::collections::VecDeque;
use std::time::Instant;

use drawforge_core::InfeasibilityReason;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{finish, Phase, PhaseOutcome};
use crate::model::ConstraintModel;
use crate::permutation::UNASSIGNED;
use crate::scope::SolveScope;
use crate::statistics::{PhaseKind, PhaseStatistics};
use crate::termination::Termination;

const NONE: usize = usize::MAX;

/// Decides whether an assignment without mutual pairs exists and builds one
/// when it does.
///
/// Each search grows one alternating tree from an unmatched port and counts
/// as one node. A search that finds no augmenting path proves that no
/// perfect matching exists, so the phase never needs more searches than
/// there are ports. Pair order, adjacency order and cycle direction are
/// shuffled, so repeated runs differ when more than one answer exists.
#[derive(Debug)]
pub struct CycleCoverPhase<T: Termination> {
    termination: T,
}

impl<T: Termination> CycleCoverPhase<T> {
    pub fn new(termination: T) -> Self {
        Self { termination }
    }
}

impl<T: Termination> Phase for CycleCoverPhase<T> {
    fn solve(&mut self, scope: &mut SolveScope<'_>) -> PhaseOutcome {
        let started = Instant::now();
        let mut stats = PhaseStatistics::new(PhaseKind::CycleCover);
        let model = scope.model();

        let gadget = Gadget::build(model, scope.rng());
        debug!(
            pairs = gadget.pairs.len(),
            vertices = gadget.adjacency.len(),
            "Cycle cover gadget built"
        );

        let mut ports: Vec<usize> = (0..2 * model.len()).collect();
        ports.shuffle(scope.rng());

        let mut blossom = Blossom::new(&gadget.adjacency, gadget.initial_matching());
        let nodes_before = scope.node_count();
        let mut decided = None;

        for port in ports {
            if blossom.is_matched(port) {
                continue;
            }
            if self.termination.is_terminated(scope) {
                decided = Some(PhaseOutcome::Exhausted);
                break;
            }
            scope.increment_node_count();

            if !blossom.augment_from(port) {
                trace!(participant = %model.id(port / 2), "No augmenting path from port");
                decided = Some(PhaseOutcome::Infeasible(
                    InfeasibilityReason::NoCycleFreeAssignment,
                ));
                break;
            }
        }
        stats.step_count = scope.node_count() - nodes_before;

        let outcome = match decided {
            Some(outcome) => outcome,
            None => PhaseOutcome::Solved(gadget.orient(blossom.mates(), scope.rng())),
        };
        finish(scope, stats, started, outcome)
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::CycleCover
    }
}

/// The matching graph for one model.
struct Gadget {
    participants: usize,
    /// Allowed pairs `(u, v)` with `u < v`, in shuffled order.
    pairs: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Gadget {
    fn build<R: Rng + ?Sized>(model: &ConstraintModel, rng: &mut R) -> Self {
        let n = model.len();
        let mut pairs = Vec::new();
        for u in 0..n {
            for &v in model.candidates(u) {
                if u < v {
                    pairs.push((u, v));
                }
            }
        }
        pairs.shuffle(rng);

        let mut adjacency = vec![Vec::new(); 2 * n + 2 * pairs.len()];
        let mut link = |a: usize, b: usize| {
            adjacency[a].push(b);
            adjacency[b].push(a);
        };
        for (k, &(u, v)) in pairs.iter().enumerate() {
            let x = 2 * n + 2 * k;
            let y = x + 1;
            link(x, y);
            link(x, 2 * u);
            link(x, 2 * u + 1);
            link(y, 2 * v);
            link(y, 2 * v + 1);
        }
        for neighbors in &mut adjacency {
            neighbors.shuffle(rng);
        }

        Self {
            participants: n,
            pairs,
            adjacency,
        }
    }

    fn pair_vertex(&self, k: usize) -> usize {
        2 * self.participants + 2 * k
    }

    /// Every pair unused, every port free.
    fn initial_matching(&self) -> Vec<usize> {
        let mut mate = vec![NONE; self.adjacency.len()];
        for k in 0..self.pairs.len() {
            let x = self.pair_vertex(k);
            mate[x] = x + 1;
            mate[x + 1] = x;
        }
        mate
    }

    /// Turns a perfect matching into an assignment, walking each cycle of
    /// used pairs in a random direction.
    fn orient<R: Rng + ?Sized>(&self, mate: &[usize], rng: &mut R) -> Vec<usize> {
        let n = self.participants;
        let mut neighbors: Vec<SmallVec<[usize; 2]>> = vec![SmallVec::new(); n];
        for (k, &(u, v)) in self.pairs.iter().enumerate() {
            let x = self.pair_vertex(k);
            if mate[x] != x + 1 {
                neighbors[u].push(v);
                neighbors[v].push(u);
            }
        }
        debug_assert!(neighbors.iter().all(|used| used.len() == 2));

        let mut perm = vec![UNASSIGNED; n];
        for start in 0..n {
            if perm[start] != UNASSIGNED {
                continue;
            }
            let first = neighbors[start][usize::from(rng.random_bool(0.5))];
            perm[start] = first;

            let (mut prev, mut current) = (start, first);
            while current != start {
                let [a, b] = [neighbors[current][0], neighbors[current][1]];
                let next = if a == prev { b } else { a };
                perm[current] = next;
                prev = current;
                current = next;
            }
        }
        perm
    }
}

/// Edmonds' blossom algorithm over a fixed adjacency list.
struct Blossom<'g> {
    adjacency: &'g [Vec<usize>],
    mate: Vec<usize>,
    parent: Vec<usize>,
    base: Vec<usize>,
    queued: Vec<bool>,
    queue: VecDeque<usize>,
    on_path: Vec<bool>,
    in_blossom: Vec<bool>,
}

impl<'g> Blossom<'g> {
    fn new(adjacency: &'g [Vec<usize>], mate: Vec<usize>) -> Self {
        let size = adjacency.len();
        Self {
            adjacency,
            mate,
            parent: vec![NONE; size],
            base: (0..size).collect(),
            queued: vec![false; size],
            queue: VecDeque::new(),
            on_path: vec![false; size],
            in_blossom: vec![false; size],
        }
    }

    fn is_matched(&self, v: usize) -> bool {
        self.mate[v] != NONE
    }

    fn mates(&self) -> &[usize] {
        &self.mate
    }

    /// Augments along an alternating path from the unmatched `root`.
    /// Returns false if none exists.
    fn augment_from(&mut self, root: usize) -> bool {
        match self.find_path(root) {
            Some(end) => {
                self.flip(end);
                true
            }
            None => false,
        }
    }

    fn find_path(&mut self, root: usize) -> Option<usize> {
        let adjacency = self.adjacency;
        self.parent.fill(NONE);
        self.queued.fill(false);
        for (v, base) in self.base.iter_mut().enumerate() {
            *base = v;
        }
        self.queue.clear();
        self.queued[root] = true;
        self.queue.push_back(root);

        while let Some(v) = self.queue.pop_front() {
            for &to in &adjacency[v] {
                if self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                if to == root || (self.mate[to] != NONE && self.parent[self.mate[to]] != NONE) {
                    self.contract(v, to);
                } else if self.parent[to] == NONE {
                    self.parent[to] = v;
                    if self.mate[to] == NONE {
                        return Some(to);
                    }
                    let next = self.mate[to];
                    self.queued[next] = true;
                    self.queue.push_back(next);
                }
            }
        }
        None
    }

    /// Shrinks the odd cycle closed by the edge `v`-`to` onto its base.
    fn contract(&mut self, v: usize, to: usize) {
        let base = self.common_base(v, to);
        self.in_blossom.fill(false);
        self.mark_path(v, base, to);
        self.mark_path(to, base, v);

        for u in 0..self.base.len() {
            if self.in_blossom[self.base[u]] {
                self.base[u] = base;
                if !self.queued[u] {
                    self.queued[u] = true;
                    self.queue.push_back(u);
                }
            }
        }
    }

    fn common_base(&mut self, a: usize, b: usize) -> usize {
        self.on_path.fill(false);
        let mut a = a;
        loop {
            a = self.base[a];
            self.on_path[a] = true;
            if self.mate[a] == NONE {
                break;
            }
            a = self.parent[self.mate[a]];
        }
        let mut b = b;
        loop {
            b = self.base[b];
            if self.on_path[b] {
                return b;
            }
            b = self.parent[self.mate[b]];
        }
    }

    fn mark_path(&mut self, v: usize, base: usize, child: usize) {
        let (mut v, mut child) = (v, child);
        while self.base[v] != base {
            self.in_blossom[self.base[v]] = true;
            self.in_blossom[self.base[self.mate[v]]] = true;
            self.parent[v] = child;
            child = self.mate[v];
            v = self.parent[self.mate[v]];
        }
    }

    fn flip(&mut self, end: usize) {
        let mut v = end;
        while v != NONE {
            let pv = self.parent[v];
            let next = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use drawforge_test::GroupFixture;

    use super::*;

    fn cycle_graph(n: usize) -> Vec<Vec<usize>> {
        (0..n).map(|v| vec![(v + n - 1) % n, (v + 1) % n]).collect()
    }

    fn matched_count(blossom: &Blossom<'_>) -> usize {
        blossom.mates().iter().filter(|&&m| m != NONE).count()
    }

    #[test]
    fn test_blossom_matches_even_cycle() {
        let adjacency = cycle_graph(6);
        let mut blossom = Blossom::new(&adjacency, vec![NONE; 6]);

        for v in 0..6 {
            if !blossom.is_matched(v) {
                assert!(blossom.augment_from(v));
            }
        }

        assert_eq!(matched_count(&blossom), 6);
    }

    #[test]
    fn test_blossom_augments_through_odd_cycle() {
        // 2-3-4 is an odd cycle with 1=2 and 3=4 matched; the only path
        // from 0 to 5 runs around it.
        let adjacency = vec![
            vec![1],
            vec![0, 2],
            vec![1, 3, 4],
            vec![2, 4, 5],
            vec![3, 2],
            vec![3],
        ];
        let mut mate = vec![NONE; 6];
        for (a, b) in [(1, 2), (3, 4)] {
            mate[a] = b;
            mate[b] = a;
        }
        let mut blossom = Blossom::new(&adjacency, mate);

        assert!(blossom.augment_from(0));
        assert_eq!(matched_count(&blossom), 6);
        for v in 0..6 {
            let m = blossom.mates()[v];
            assert!(adjacency[v].contains(&m));
            assert_eq!(blossom.mates()[m], v);
        }
    }

    #[test]
    fn test_blossom_fails_on_odd_cycle() {
        let adjacency = cycle_graph(5);
        let mut blossom = Blossom::new(&adjacency, vec![NONE; 5]);

        let mut failures = 0;
        for v in 0..5 {
            if !blossom.is_matched(v) && !blossom.augment_from(v) {
                failures += 1;
            }
        }

        assert_eq!(matched_count(&blossom), 4);
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_orient_follows_used_pairs() {
        let group = GroupFixture::ring(5);
        let model = ConstraintModel::build(group.participants(), group.exclusions()).unwrap();
        let mut rng = rand::rng();
        let gadget = Gadget::build(&model, &mut rng);

        // Use pairs {i, i+1 mod 5} and leave the rest out.
        let mut mate = gadget.initial_matching();
        for (k, &(u, v)) in gadget.pairs.iter().enumerate() {
            if v == u + 1 || (u == 0 && v == 4) {
                let x = gadget.pair_vertex(k);
                let (pu, pv) = if v == u + 1 { (2 * u + 1, 2 * v) } else { (2 * u, 2 * v + 1) };
                mate[x] = pu;
                mate[pu] = x;
                mate[x + 1] = pv;
                mate[pv] = x + 1;
            }
        }
        let perm = gadget.orient(&mate, &mut rng);

        let forward = (0..5).all(|i| perm[i] == (i + 1) % 5);
        let backward = (0..5).all(|i| perm[(i + 1) % 5] == i);
        assert!(forward || backward);
    }
}
