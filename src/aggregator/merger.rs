//! Merge per-sample stacks into depth levels of packed intervals.
//!
//! Stacks are sorted lexicographically so that every shared call-path
//! prefix forms a contiguous run. Each depth is then partitioned into runs
//! of equal name ids, and runs with deeper frames are queued for the next
//! depth. The work list is explicit: profiles can be hundreds of frames
//! deep and recursion would follow that depth.

use super::name_resolver::NameId;
use super::stack_builder::Stack;
use log::debug;
use std::collections::VecDeque;

/// A run of adjacent sorted stacks sharing one name at a given depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Index of the first stack of the run (sorted order)
    pub start: usize,

    /// Number of stacks in the run, always at least 1
    pub width: usize,

    /// Name shared by the run at this depth
    pub name_id: NameId,
}

impl Interval {
    pub fn new(start: usize, width: usize, name_id: NameId) -> Self {
        Self {
            start,
            width,
            name_id,
        }
    }

    /// Exclusive end index
    pub fn end(&self) -> usize {
        self.start + self.width
    }
}

/// Intervals of one depth, ordered by `start`
pub type Level = Vec<Interval>;

/// Pending `(depth, lo, hi)` range, `hi` inclusive
#[derive(Debug, Clone, Copy)]
struct Task {
    depth: usize,
    lo: usize,
    hi: usize,
}

/// Sort stacks lexicographically by name id, shorter prefixes first
///
/// **Public** - the sort is stable and total, so output is deterministic
pub fn sort_stacks(stacks: &mut [Stack]) {
    stacks.sort();
}

/// Sort `stacks` in place and merge them into levels
///
/// **Public** - main entry point for merging
///
/// # Returns
/// One level per depth; `levels[0]` holds the outermost frames. After the
/// call `stacks` is in the sorted order the interval indices refer to.
pub fn merge_stacks(stacks: &mut [Stack]) -> Vec<Level> {
    sort_stacks(stacks);
    let levels = merge_sorted_stacks(stacks);

    debug!(
        "Merged {} stacks into {} levels ({} intervals)",
        stacks.len(),
        levels.len(),
        levels.iter().map(Vec::len).sum::<usize>()
    );

    levels
}

/// Merge stacks that are already sorted
///
/// Tasks are processed first in, first out, so depths are visited in
/// increasing order and each depth's ranges in increasing `start` order.
pub fn merge_sorted_stacks(stacks: &[Stack]) -> Vec<Level> {
    let mut levels: Vec<Level> = Vec::new();
    if stacks.is_empty() {
        return levels;
    }

    let mut queue = VecDeque::new();
    queue.push_back(Task {
        depth: 0,
        lo: 0,
        hi: stacks.len() - 1,
    });

    while let Some(Task { depth, lo, hi }) = queue.pop_front() {
        let mut i = lo;

        while i <= hi {
            let Some(&id) = stacks[i].get(depth) else {
                // Stack ended above this depth
                i += 1;
                continue;
            };

            let start = i;
            let mut has_children = false;
            while i <= hi && stacks[i].get(depth) == Some(&id) {
                if stacks[i].len() > depth + 1 {
                    has_children = true;
                }
                i += 1;
            }

            if has_children {
                queue.push_back(Task {
                    depth: depth + 1,
                    lo: start,
                    hi: i - 1,
                });
            }

            if levels.len() <= depth {
                levels.resize_with(depth + 1, Vec::new);
            }
            levels[depth].push(Interval::new(start, i - start, id));
        }
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let mut stacks: Vec<Stack> = vec![];
        assert!(merge_stacks(&mut stacks).is_empty());
    }

    #[test]
    fn test_identical_stacks_merge() {
        let mut stacks = vec![vec![0], vec![0]];
        let levels = merge_stacks(&mut stacks);

        assert_eq!(levels, vec![vec![Interval::new(0, 2, 0)]]);
    }

    #[test]
    fn test_prefix_stack_nests() {
        let mut stacks = vec![vec![0, 1], vec![0]];
        let levels = merge_stacks(&mut stacks);

        assert_eq!(stacks, vec![vec![0], vec![0, 1]]);
        assert_eq!(
            levels,
            vec![vec![Interval::new(0, 2, 0)], vec![Interval::new(1, 1, 1)]]
        );
    }

    #[test]
    fn test_runs_split_by_parent() {
        // Same name at depth 1 under different parents stays separate
        let mut stacks = vec![vec![0, 2], vec![1, 2]];
        let levels = merge_stacks(&mut stacks);

        assert_eq!(
            levels[1],
            vec![Interval::new(0, 1, 2), Interval::new(1, 1, 2)]
        );
    }

    #[test]
    fn test_sorting_groups_shared_prefixes() {
        let mut stacks = vec![vec![0, 1, 2], vec![3], vec![0, 1, 2], vec![0, 4]];
        let levels = merge_stacks(&mut stacks);

        assert_eq!(
            stacks,
            vec![vec![0, 1, 2], vec![0, 1, 2], vec![0, 4], vec![3]]
        );
        assert_eq!(
            levels,
            vec![
                vec![Interval::new(0, 3, 0), Interval::new(3, 1, 3)],
                vec![Interval::new(0, 2, 1), Interval::new(2, 1, 4)],
                vec![Interval::new(0, 2, 2)],
            ]
        );
    }

    #[test]
    fn test_empty_stacks_take_no_interval() {
        let mut stacks = vec![vec![5], vec![], vec![]];
        let levels = merge_stacks(&mut stacks);

        assert_eq!(levels, vec![vec![Interval::new(2, 1, 5)]]);
    }

    #[test]
    fn test_deep_stack_does_not_recurse() {
        let deep: Stack = (0..50_000).collect();
        let mut stacks = vec![deep.clone(), deep];
        let levels = merge_stacks(&mut stacks);

        assert_eq!(levels.len(), 50_000);
        assert!(levels
            .iter()
            .enumerate()
            .all(|(d, level)| level == &vec![Interval::new(0, 2, d)]));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut stacks = vec![vec![2, 1], vec![0], vec![2], vec![0, 3, 1], vec![0, 3]];
        sort_stacks(&mut stacks);
        let once = stacks.clone();
        sort_stacks(&mut stacks);

        assert_eq!(stacks, once);
    }

    #[test]
    fn test_levels_sorted_and_disjoint() {
        let mut stacks = vec![
            vec![1, 2, 3],
            vec![0, 2],
            vec![1, 2],
            vec![0, 5, 6, 7],
            vec![1],
            vec![0, 2, 9],
            vec![4, 4, 4],
        ];
        let levels = merge_stacks(&mut stacks);

        for level in &levels {
            assert!(level.iter().all(|iv| iv.width >= 1));
            for pair in level.windows(2) {
                assert!(pair[0].end() <= pair[1].start);
            }
        }
    }
}
