use fxhash::FxBuildHasher;
/// This module implements the best-first search core behind
/// [find_path](crate::MazeGrid::find_path). Per-node bookkeeping lives in an
/// insertion-ordered [IndexMap] acting as an arena: parent references are map
/// slots rather than owned pointers, so reconstruction never touches a cyclic
/// ownership graph.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

/// A frontier entry: the estimated total cost through a node, the cost the node
/// was queued at, its slot in the node arena and the push sequence number.
struct FrontierEntry<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
    seq: usize,
}

impl<K: PartialEq> Eq for FrontierEntry<K> {}

impl<K: PartialEq> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.seq.eq(&other.seq)
    }
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Orders by estimated cost; equal estimates are resolved in favor of
        // the entry pushed first so equal-cost paths resolve the same way on
        // every run.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// A* over an implicit graph. Each arena slot records the parent slot, the best
/// known cost and the heuristic value, which is computed once when a node is
/// first discovered and reused on every later improvement.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let start_h = heuristic(start);
    let mut to_see = BinaryHeap::new();
    let mut pushes: usize = 0;
    to_see.push(FrontierEntry {
        estimated_cost: start_h,
        cost: Zero::zero(),
        index: 0,
        seq: pushes,
    });
    let mut nodes: FxIndexMap<N, (usize, C, C)> = FxIndexMap::default();
    nodes.insert(start.clone(), (usize::MAX, Zero::zero(), start_h));
    while let Some(FrontierEntry { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, &(_, best_cost, _)) = nodes.get_index(index).unwrap();
            // A node is pushed again whenever a better route to it is found
            // before it is expanded. Only the entry matching the current best
            // cost is authoritative; outdated duplicates are dropped here.
            if cost > best_cost {
                continue;
            }
            if success(node) {
                let path = reverse_path(&nodes, |&(p, _, _)| p, index);
                return Some((path, cost));
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // arena slot for successor
            match nodes.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost, h));
                }
                Occupied(mut e) => {
                    let &(_, best_cost, cached_h) = e.get();
                    if new_cost < best_cost {
                        h = cached_h;
                        n = e.index();
                        e.insert((index, new_cost, cached_h));
                    } else {
                        continue;
                    }
                }
            }

            pushes += 1;
            to_see.push(FrontierEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
                seq: pushes,
            });
        }
    }
    warn!("Frontier exhausted without reaching the goal");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // Line graph 0 - 1 - 2 - 3 with unit edges.
    fn line_successors(n: &u32) -> Vec<(u32, i32)> {
        let mut succ = Vec::new();
        if *n > 0 {
            succ.push((n - 1, 1));
        }
        if *n < 3 {
            succ.push((n + 1, 1));
        }
        succ
    }

    #[test]
    fn start_satisfies_goal() {
        let result = astar(&0u32, line_successors, |_| 0, |n| *n == 0);
        let (path, cost) = result.unwrap();
        assert_eq!(path, vec![0]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn walks_the_line() {
        let result = astar(&0u32, line_successors, |n| 3 - *n as i32, |n| *n == 3);
        let (path, cost) = result.unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3);
    }

    #[test]
    fn exhausts_without_goal() {
        let result = astar(&0u32, line_successors, |_| 0, |n| *n == 10);
        assert!(result.is_none());
    }
}
