use nodeprof_timeline::aggregator::merger::{merge_stacks, sort_stacks, Interval};
use nodeprof_timeline::aggregator::name_resolver::{code_to_name, NameTable};
use nodeprof_timeline::aggregator::stack_builder::build_stacks;
use nodeprof_timeline::parser::{CodeEntry, CodeKind, CodeType, Log, Tick};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn opt(name: &str) -> CodeEntry {
    CodeEntry::new(name, CodeType::Js).with_kind(CodeKind::Opt)
}

/// Log with a mix of entry types, shared paths and bad references
fn mixed_log() -> Log {
    Log::new(
        vec![
            opt("main /srv/app/src/index.js:1:1"),
            CodeEntry::new("handle /srv/app/src/lib/http.js:10:3", CodeType::Js)
                .with_kind(CodeKind::Unopt),
            CodeEntry::new("T node::Start(int, char**)", CodeType::Cpp),
            CodeEntry::new("/usr/lib/libc.so.6", CodeType::SharedLib),
            CodeEntry::new("StringAdd", CodeType::Code).with_kind(CodeKind::Builtin),
            opt(" /srv/app/src/index.js:20:5"),
        ],
        vec![
            Tick::new(vec![2, 7, 0, 3]),
            Tick::new(vec![1, 5, 0, 8]),
            Tick::new(vec![4, 2, 1, 6, 0, 11]),
            Tick::new(vec![99, 0, 0, 4]),
            Tick::new(vec![3, 1, 2, 1]),
            Tick::new(vec![5, 0, 0, 0]),
            Tick::new(vec![1, 3, 0, 2]),
        ],
    )
}

#[test]
fn test_cpp_label_trimmed() {
    let entry = CodeEntry::new("t foo(int)", CodeType::Cpp);
    assert_eq!(code_to_name(Some(&entry), None), "(C++) foo");
}

#[test]
fn test_mixed_labels() {
    let built = build_stacks(&mixed_log());

    assert_eq!(
        built.names.as_slice(),
        &[
            "main ./index.js:1:1".to_string(),
            "(C++) node::Start".to_string(),
            "~handle ./lib/http.js:10:3".to_string(),
            "(builtin) StringAdd".to_string(),
            "(unknown)".to_string(),
            "(lib) /usr/lib/libc.so.6".to_string(),
            "(anonymous) ./index.js:20:5".to_string(),
        ]
    );
}

#[test]
fn test_name_table_unique_and_ids_valid() {
    let built = build_stacks(&mixed_log());

    let unique: HashSet<&String> = built.names.as_slice().iter().collect();
    assert_eq!(unique.len(), built.names.len());

    for stack in &built.stacks {
        for &id in stack {
            assert!(id < built.names.len());
        }
    }
}

#[test]
fn test_one_stack_per_tick() {
    let log = mixed_log();
    let built = build_stacks(&log);
    assert_eq!(built.stacks.len(), log.ticks.len());
}

#[test]
fn test_levels_non_overlapping_and_sorted() {
    let mut built = build_stacks(&mixed_log());
    let levels = merge_stacks(&mut built.stacks);

    for level in &levels {
        for pair in level.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end() <= pair[1].start);
        }
        assert!(level.iter().all(|iv| iv.width >= 1));
    }
}

#[test]
fn test_levels_nest_under_parents() {
    let mut built = build_stacks(&mixed_log());
    let levels = merge_stacks(&mut built.stacks);

    for depth in 1..levels.len() {
        for child in &levels[depth] {
            let parent = levels[depth - 1]
                .iter()
                .find(|p| p.start <= child.start && child.end() <= p.end());
            assert!(parent.is_some(), "orphan interval {:?} at depth {}", child, depth);
        }
    }
}

#[test]
fn test_sort_idempotent() {
    let mut stacks = build_stacks(&mixed_log()).stacks;
    sort_stacks(&mut stacks);
    let sorted = stacks.clone();
    sort_stacks(&mut stacks);
    assert_eq!(stacks, sorted);
}

#[test]
fn test_shared_outer_frame() {
    let mut names = NameTable::new();
    let a = names.intern("A".to_string());
    let b = names.intern("B".to_string());

    let mut stacks = vec![vec![a], vec![a, b]];
    let levels = merge_stacks(&mut stacks);

    assert_eq!(levels[0], vec![Interval::new(0, 2, a)]);
    assert_eq!(levels[1], vec![Interval::new(1, 1, b)]);
}
