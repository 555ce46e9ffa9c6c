//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which reports every change to the open and closed sets to an observer, and lets that observer
//! stop the search between steps.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, trace, warn};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::ControlFlow;

use crate::Cell;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// The start node is always the first one recorded.
const START_INDEX: usize = 0;
const NO_PARENT: usize = usize::MAX;

/// How a search that was allowed to start ended. None of these are errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult<N = Cell> {
    /// The path from the node after the start up to and including the end.
    Found(Vec<N>),
    /// The open set ran dry without reaching the end.
    NotFound,
    /// The observer asked to stop.
    Cancelled,
}

impl<N> PathResult<N> {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn path(&self) -> Option<&[N]> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Number of steps in a found path.
    pub fn len(&self) -> Option<usize> {
        self.path().map(<[N]>::len)
    }

    pub fn into_path(self) -> Option<Vec<N>> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// A single observable change made by the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent<N = Cell> {
    /// A node entered the open set.
    Opened(N),
    /// A node other than the start finished expanding.
    Closed(N),
    /// One expansion is complete. `expanded` counts expansions so far, `open` is the size of the
    /// open set afterwards.
    Iteration { expanded: usize, open: usize },
    /// A node on the found path, reported in order from the start side to the end.
    Path(N),
}

/// Heap entry. Ordered so that [BinaryHeap] pops the smallest estimated cost first and, among
/// equal estimates, the entry that was queued first.
struct OpenEntry<K> {
    estimated_cost: K,
    order: usize,
    index: usize,
}

impl<K: PartialEq> Eq for OpenEntry<K> {}

impl<K: PartialEq> PartialEq for OpenEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.order == other.order
    }
}

impl<K: Ord> PartialOrd for OpenEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for OpenEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Per-node bookkeeping: `came_from` and `g_score` of a single node. The `f_score` lives in the
/// node's [OpenEntry].
struct Scores<K> {
    parent: usize,
    cost: K,
}

/// Everything one run of the search owns. Nodes are interned in insertion order so that the heap
/// and the membership set only deal in indices.
struct SearchState<N, K> {
    nodes: FxIndexMap<N, Scores<K>>,
    open_set: BinaryHeap<OpenEntry<K>>,
    open_members: FxHashSet<usize>,
    counter: usize,
}

impl<N, K> SearchState<N, K>
where
    N: Eq + Hash + Clone,
    K: Zero + Ord + Copy,
{
    fn new(start: N, estimated_cost: K) -> Self {
        let mut state = SearchState {
            nodes: FxIndexMap::default(),
            open_set: BinaryHeap::new(),
            open_members: FxHashSet::default(),
            counter: 0,
        };
        state.nodes.insert(
            start,
            Scores {
                parent: NO_PARENT,
                cost: Zero::zero(),
            },
        );
        state.push(START_INDEX, estimated_cost);
        state
    }

    fn push(&mut self, index: usize, estimated_cost: K) {
        self.open_set.push(OpenEntry {
            estimated_cost,
            order: self.counter,
            index,
        });
        self.counter += 1;
        self.open_members.insert(index);
    }

    fn pop(&mut self) -> Option<usize> {
        let entry = self.open_set.pop()?;
        self.open_members.remove(&entry.index);
        Some(entry.index)
    }

    /// Walks `came_from` back from `end_index`. The start itself is left out.
    fn reconstruct_path(&self, end_index: usize) -> Vec<N> {
        let mut path = std::iter::successors(Some(end_index), |&i| {
            self.nodes.get_index(i).map(|(_, scores)| scores.parent)
        })
        .take_while(|&i| i != START_INDEX && i != NO_PARENT)
        .filter_map(|i| self.nodes.get_index(i).map(|(node, _)| node.clone()))
        .collect::<Vec<N>>();
        path.reverse();
        path
    }
}

fn cancelled<N>(expanded: usize) -> PathResult<N> {
    warn!("Search cancelled by observer after {} expansions", expanded);
    PathResult::Cancelled
}

/// Runs A* from `start` to `end`.
///
/// `successors` yields the neighbours of a node together with the cost of moving there and
/// `heuristic` estimates the remaining cost to `end`; for the result to be optimal it must never
/// overestimate. Every change to the open and closed sets is passed to `on_step` as a
/// [SearchEvent]. As soon as `on_step` returns [ControlFlow::Break] the search stops without
/// calling it again and [PathResult::Cancelled] is returned.
///
/// A node that is already queued keeps its original position in the open set when a cheaper way
/// to it is found; only its scores and predecessor are updated.
pub fn astar_observed<N, C, FN, IN, FH, FO>(
    start: &N,
    end: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut on_step: FO,
) -> PathResult<N>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FO: FnMut(SearchEvent<N>) -> ControlFlow<()>,
{
    let mut state = SearchState::new(start.clone(), heuristic(start));
    let mut expanded = 0;
    while let Some(index) = state.pop() {
        let Some((current, cost)) = state
            .nodes
            .get_index(index)
            .map(|(node, scores)| (node.clone(), scores.cost))
        else {
            continue;
        };
        if current == *end {
            let path = state.reconstruct_path(index);
            debug!(
                "Reached end after {} expansions, path has {} steps",
                expanded,
                path.len()
            );
            for node in &path {
                if on_step(SearchEvent::Path(node.clone())).is_break() {
                    return cancelled(expanded);
                }
            }
            return PathResult::Found(path);
        }
        expanded += 1;

        for (successor, move_cost) in successors(&current) {
            let new_cost = cost + move_cost;
            let (n, estimated_cost) = match state.nodes.entry(successor.clone()) {
                Vacant(e) => {
                    let estimated_cost = new_cost + heuristic(e.key());
                    let n = e.index();
                    e.insert(Scores {
                        parent: index,
                        cost: new_cost,
                    });
                    (n, estimated_cost)
                }
                Occupied(mut e) => {
                    if new_cost < e.get().cost {
                        let estimated_cost = new_cost + heuristic(e.key());
                        e.insert(Scores {
                            parent: index,
                            cost: new_cost,
                        });
                        (e.index(), estimated_cost)
                    } else {
                        continue;
                    }
                }
            };
            if !state.open_members.contains(&n) {
                state.push(n, estimated_cost);
                if on_step(SearchEvent::Opened(successor)).is_break() {
                    return cancelled(expanded);
                }
            }
        }

        if index != START_INDEX && on_step(SearchEvent::Closed(current)).is_break() {
            return cancelled(expanded);
        }
        trace!(
            "Expansion {} done, {} nodes known, {} queued",
            expanded,
            state.nodes.len(),
            state.open_set.len()
        );
        let iteration = SearchEvent::Iteration {
            expanded,
            open: state.open_set.len(),
        };
        if on_step(iteration).is_break() {
            return cancelled(expanded);
        }
    }
    debug!("Open set exhausted after {} expansions", expanded);
    PathResult::NotFound
}
