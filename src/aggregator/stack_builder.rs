//! Build root-first call stacks of name ids from profiler ticks.
//!
//! Each tick's `s` array interleaves code-table indices (even offsets)
//! with auxiliary values (odd offsets), leaf first. Walking the even
//! offsets backwards yields the frames root first.

use super::name_resolver::{NameId, NameResolver, NameTable};
use crate::parser::schema::{Log, Tick};
use log::debug;

/// One sample's frames, outermost first
pub type Stack = Vec<NameId>;

/// Output of the stack builder: the label table and one stack per tick
///
/// **Public** - consumed by the merger and the model builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStacks {
    /// Labels referenced by `stacks`
    pub names: NameTable,

    /// One stack per tick, in tick order
    pub stacks: Vec<Stack>,
}

impl ProfileStacks {
    /// Label of a name id
    pub fn label(&self, id: NameId) -> Option<&str> {
        self.names.get(id)
    }
}

/// Build stacks for every tick of `log`
///
/// **Public** - main entry point for stack building
///
/// # Algorithm
/// 1. Detect the shared JS path over the whole code table
/// 2. For each tick, visit the even offsets of `s` from the highest down to 0
/// 3. Resolve the code entry named by each visited value (out of range = `(unknown)`)
///
/// Auxiliary values at odd offsets are never read.
/// 4. Intern the label and push its id
pub fn build_stacks(log: &Log) -> ProfileStacks {
    debug!("Building stacks from {} ticks", log.ticks.len());

    let resolver = NameResolver::new(log.code.iter().map(Option::as_ref));
    let mut names = NameTable::new();
    let mut unresolved = 0usize;

    let stacks: Vec<Stack> = log
        .ticks
        .iter()
        .map(|tick| {
            let (stack, missing) = build_stack(log, tick, &resolver, &mut names);
            unresolved += missing;
            stack
        })
        .collect();

    if unresolved > 0 {
        debug!("{} frames referenced missing code entries", unresolved);
    }
    debug!(
        "Built {} stacks over {} distinct labels",
        stacks.len(),
        names.len()
    );

    ProfileStacks { names, stacks }
}

/// Build the stack of a single tick; also returns the unresolved frame count
///
/// **Private** - internal helper for build_stacks
fn build_stack(
    log: &Log,
    tick: &Tick,
    resolver: &NameResolver,
    names: &mut NameTable,
) -> (Stack, usize) {
    let mut stack = Stack::with_capacity(tick.s.len().div_ceil(2));
    let mut unresolved = 0;

    for offset in (0..tick.s.len()).step_by(2).rev() {
        let code = log.code_entry(tick.s[offset]);
        if code.is_none() {
            unresolved += 1;
        }
        stack.push(names.intern(resolver.resolve(code)));
    }

    (stack, unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{CodeEntry, CodeKind, CodeType};

    fn opt(name: &str) -> CodeEntry {
        CodeEntry::new(name, CodeType::Js).with_kind(CodeKind::Opt)
    }

    #[test]
    fn test_single_frame() {
        let log = Log::new(vec![opt("foo")], vec![Tick::new(vec![0, 0])]);
        let built = build_stacks(&log);

        assert_eq!(built.stacks, vec![vec![0]]);
        assert_eq!(built.names.as_slice(), &["foo".to_string()]);
    }

    #[test]
    fn test_root_first_order() {
        // leaf = c, root = a
        let log = Log::new(
            vec![opt("a"), opt("b"), opt("c")],
            vec![Tick::new(vec![2, 9, 1, 9, 0, 9])],
        );
        let built = build_stacks(&log);

        // Offsets 4, 2, 0 hold the values 0, 1, 2
        let labels: Vec<&str> = built.stacks[0]
            .iter()
            .map(|&id| built.label(id).unwrap())
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_auxiliary_values_are_ignored() {
        let log = Log::new(
            vec![opt("root"), opt("leaf")],
            vec![Tick::new(vec![1, 57, 0, 12])],
        );
        let built = build_stacks(&log);

        let labels: Vec<&str> = built.stacks[0]
            .iter()
            .map(|&id| built.label(id).unwrap())
            .collect();
        assert_eq!(labels, vec!["root", "leaf"]);
    }

    #[test]
    fn test_out_of_range_is_unknown() {
        let log = Log::new(vec![opt("foo")], vec![Tick::new(vec![7, 0])]);
        let built = build_stacks(&log);

        assert_eq!(built.stacks.len(), 1);
        assert_eq!(built.label(built.stacks[0][0]), Some("(unknown)"));
    }

    #[test]
    fn test_negative_index_is_unknown() {
        let log = Log::new(vec![opt("foo")], vec![Tick::new(vec![-1, 0])]);
        let built = build_stacks(&log);

        assert_eq!(built.label(built.stacks[0][0]), Some("(unknown)"));
    }

    #[test]
    fn test_odd_length_visits_even_offsets() {
        let log = Log::new(vec![opt("a"), opt("b")], vec![Tick::new(vec![1, 5, 0])]);
        let built = build_stacks(&log);

        // Offsets 2 and 0 hold 0 and 1
        let labels: Vec<&str> = built.stacks[0]
            .iter()
            .map(|&id| built.label(id).unwrap())
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_tick_gives_empty_stack() {
        let log = Log::new(vec![opt("a")], vec![Tick::default(), Tick::new(vec![0, 0])]);
        let built = build_stacks(&log);

        assert_eq!(built.stacks, vec![vec![], vec![0]]);
    }

    #[test]
    fn test_labels_are_shared_across_ticks() {
        let log = Log::new(
            vec![opt("main"), opt("work")],
            vec![
                Tick::new(vec![0, 0, 0, 0]),
                Tick::new(vec![1, 0, 0, 0]),
                Tick::new(vec![1, 0, 0, 0]),
            ],
        );
        let built = build_stacks(&log);

        assert_eq!(built.names.len(), 2);
        assert_eq!(built.stacks, vec![vec![0, 0], vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_duplicate_labels_from_different_entries_share_id() {
        let log = Log::new(
            vec![opt("same"), opt("same")],
            vec![Tick::new(vec![0, 0]), Tick::new(vec![1, 0])],
        );
        let built = build_stacks(&log);

        assert_eq!(built.names.len(), 1);
        assert_eq!(built.stacks, vec![vec![0], vec![0]]);
    }
}
