use crate::*;

use sectional::{Alignment, Coordinate, Extent, SectionedEdit};
use std::boxed::Box;
use std::format;
use std::string::{String, ToString};
use std::vec;
use std::vec::Vec;

type Person = (char, &'static str);
type People = GroupingSection<Person, char, String>;
type Banner = DiffingSection<&'static str, String>;

fn banner(lines: Vec<&'static str>) -> Banner {
    DiffingSection::new(
        lines,
        SectionOptions::new(|at: Coordinate, s: &&'static str| format!("banner {at} {s}"))
            .with_header(Some(|| "Banner".to_string())),
    )
}

fn people(data: Vec<Person>) -> People {
    GroupingSection::new(
        data,
        GroupingOptions::new(|p: &Person| p.0, |at: Coordinate, p: &Person| {
            format!("{at} {}", p.1)
        })
        .with_header(Some(|_: usize, k: &char| format!("-- {k} --")))
        .with_index_title(Some(|k: &char| k.to_string())),
    )
}

fn batch(
    inserted_groups: Vec<usize>,
    deleted_groups: Vec<usize>,
    insertions: Vec<Coordinate>,
    deletions: Vec<Coordinate>,
) -> SectionedEdit {
    SectionedEdit {
        inserted_groups,
        deleted_groups,
        insertions,
        deletions,
        had_data: true,
        has_data: true,
    }
}

#[test]
fn plan_follows_strategy_and_exclusivity() {
    let first = SectionedEdit::flat(&[], &[1], |a: &i32, b: &i32| a == b);
    assert_eq!(
        ViewUpdate::plan(first.clone(), UpdateStrategy::Animate, true),
        ViewUpdate::Reload
    );
    assert_eq!(
        ViewUpdate::plan(first.clone(), UpdateStrategy::Animate, false),
        ViewUpdate::Batch(first.clone())
    );
    assert_eq!(
        ViewUpdate::plan(first.clone(), UpdateStrategy::Reload, false),
        ViewUpdate::Reload
    );

    let empty = SectionedEdit::flat(&[], &[], |a: &i32, b: &i32| a == b);
    assert_eq!(ViewUpdate::plan(empty.clone(), UpdateStrategy::Animate, true), ViewUpdate::None);
    assert_eq!(ViewUpdate::plan(empty, UpdateStrategy::Reload, true), ViewUpdate::None);

    let same = SectionedEdit::flat(&[1], &[1], |a: &i32, b: &i32| a == b);
    assert!(ViewUpdate::plan(same, UpdateStrategy::Animate, false).is_none());
}

#[test]
fn view_updates_reach_the_sink() {
    let edit = batch(vec![0], vec![], vec![], vec![]);
    let mut sink: Vec<ViewUpdate> = Vec::new();
    ViewUpdate::Reload.apply_to(&mut sink);
    ViewUpdate::None.apply_to(&mut sink);
    ViewUpdate::Batch(edit.clone()).apply_to(&mut sink);
    assert_eq!(sink, [ViewUpdate::Reload, ViewUpdate::Batch(edit.clone())]);
    assert_eq!(sink[1].edit(), Some(&edit));
    assert_eq!(
        ViewUpdate::Batch(edit).offset_groups(2).edit().unwrap().inserted_groups,
        [2]
    );
}

#[test]
fn diffing_section_reloads_into_first_data_then_animates() {
    let mut section = DiffingSection::new(
        Vec::new(),
        SectionOptions::new(|_: Coordinate, v: &u32| v.to_string()),
    );
    assert!(section.is_exclusive());
    assert_eq!(section.set_data(vec![]), ViewUpdate::None);
    assert_eq!(section.set_data(vec![1, 2]), ViewUpdate::Reload);

    let update = section.set_data(vec![2, 3]);
    assert_eq!(
        update,
        ViewUpdate::Batch(batch(
            vec![],
            vec![],
            vec![Coordinate::flat(1)],
            vec![Coordinate::flat(0)]
        ))
    );
    assert_eq!(section.data(), [2, 3]);
    assert_eq!(section.build_item(Coordinate::flat(1)).as_deref(), Some("3"));
    assert_eq!(section.build_item(Coordinate::new(1, 0)), None);
    assert_eq!(section.build_header(0), None);

    let ViewUpdate::Batch(edit) = section.set_data(vec![]) else {
        panic!("expected a batch");
    };
    assert_eq!(edit.deletions, [Coordinate::flat(0), Coordinate::flat(1)]);
    assert!(edit.needs_reload());
}

#[test]
fn diffing_section_with_reload_strategy() {
    let mut section = DiffingSection::new(
        vec!["a"],
        SectionOptions::new_with_eq(
            |a: &&str, b: &&str| a.eq_ignore_ascii_case(b),
            |_: Coordinate, s: &&str| s.to_string(),
        )
        .with_strategy(UpdateStrategy::Reload),
    );
    assert_eq!(section.set_data(vec!["A"]), ViewUpdate::None);
    assert_eq!(section.set_data(vec!["A", "b"]), ViewUpdate::Reload);
}

#[test]
fn grouping_section_reports_group_and_item_edits() {
    let mut section = people(vec![('a', "ann"), ('b', "bea")]);
    assert_eq!(section.group_count(), 2);

    let update = section.set_data(vec![('b', "bea"), ('c', "cy"), ('a', "ann"), ('a', "abe")]);
    assert_eq!(
        update,
        ViewUpdate::Batch(batch(vec![2], vec![], vec![Coordinate::new(0, 1)], vec![]))
    );
    assert_eq!(section.snapshot().keys(), ['a', 'b', 'c']);
    assert_eq!(section.item_count(0), 2);
    assert_eq!(section.item_count(9), 0);
    assert_eq!(
        section.build_item(Coordinate::new(0, 1)).as_deref(),
        Some("[0, 1] abe")
    );
    assert_eq!(section.build_header(2).as_deref(), Some("-- c --"));
    assert_eq!(section.index_titles(), ["a", "b", "c"]);
    assert_eq!(section.index_title_target(1), Some(Coordinate::new(1, 0)));
    assert_eq!(section.index_title_target(3), None);

    let update = section.set_data(vec![('c', "cy")]);
    assert_eq!(
        update,
        ViewUpdate::Batch(batch(vec![], vec![0, 1], vec![], vec![]))
    );
}

#[test]
fn grouping_section_sorted_input_and_original_alignment() {
    let options = GroupingOptions::new(|p: &Person| p.0, |_: Coordinate, p: &Person| p.1)
        .with_input_order(InputOrder::Sorted)
        .with_alignment(Alignment::Original);
    let mut section: GroupingSection<Person, char, &'static str> =
        GroupingSection::new(Vec::new(), options);

    // Standalone and empty: the first data reloads.
    assert_eq!(
        section.set_data(vec![('a', "ann"), ('b', "bea")]),
        ViewUpdate::Reload
    );
    assert_eq!(section.index_titles(), Vec::<String>::new());
    assert_eq!(section.build_header(0), None);

    let update = section.set_data(vec![('a', "ann"), ('a', "amy"), ('b', "bea")]);
    assert_eq!(
        update,
        ViewUpdate::Batch(batch(vec![], vec![], vec![Coordinate::new(0, 1)], vec![]))
    );
}

#[test]
fn composite_translates_section_updates_and_rebases() {
    let mut composite = Composite::<String>::new();
    let top = composite.push(banner(vec!["welcome"]));
    let list = composite.push(people(vec![('a', "ann"), ('b', "bea")]));
    let bottom = composite.push(banner(vec!["fin"]));

    assert_eq!(composite.len(), 3);
    assert_eq!(composite.group_count(), 4);
    assert_eq!(composite.offset(list).unwrap().base, Coordinate::new(1, 0));
    assert_eq!(composite.offset(bottom).unwrap().base.group, 3);

    let update = composite
        .update::<People>(list, |s| {
            s.set_data(vec![('b', "bea"), ('c', "cy"), ('a', "ann"), ('a', "abe")])
        })
        .unwrap();
    assert_eq!(
        update,
        ViewUpdate::Batch(batch(vec![3], vec![], vec![Coordinate::new(1, 1)], vec![]))
    );
    assert_eq!(composite.group_count(), 5);
    assert_eq!(composite.offset(bottom).unwrap().base.group, 4);
    assert_eq!(composite.offset(top).unwrap().base.group, 0);

    let update = composite
        .update::<Banner>(bottom, |s| s.set_data(vec!["fin", "credits"]))
        .unwrap();
    assert_eq!(
        update,
        ViewUpdate::Batch(batch(vec![], vec![], vec![Coordinate::new(4, 1)], vec![]))
    );
}

fn stack<V: 'static>(first: impl Section<V>, second: impl Section<V>) -> Composite<V> {
    let mut composite = Composite::default();
    composite.push(first);
    composite.push(second);
    composite
}

#[test]
fn composite_builds_from_generic_code() {
    let composite = stack(banner(vec!["hi"]), people(vec![('a', "ann"), ('b', "bea")]));
    assert_eq!(composite.group_count(), 3);
    assert_eq!(format!("{composite:?}"), "Composite { sections: 2, groups: 3 }");

    let boxed: Box<dyn Section<String>> = Box::new(people(vec![('c', "cy")]));
    assert_eq!(boxed.extent(), 1);
}

#[test]
fn composite_routes_queries_to_owning_section() {
    let mut composite = Composite::<String>::new();
    composite.push(banner(vec!["welcome"]));
    let list = composite.push(people(vec![('a', "ann"), ('a', "abe"), ('c', "cy")]));
    let bottom = composite.push(banner(vec!["fin"]));

    assert_eq!(composite.item_count(0), 1);
    assert_eq!(composite.item_count(1), 2);
    assert_eq!(composite.item_count(7), 0);
    assert_eq!(
        composite.build_item(Coordinate::new(0, 0)).as_deref(),
        Some("banner [0, 0] welcome")
    );
    assert_eq!(
        composite.build_item(Coordinate::new(2, 0)).as_deref(),
        Some("[1, 0] cy")
    );
    assert_eq!(
        composite.build_item(Coordinate::new(3, 0)).as_deref(),
        Some("banner [0, 0] fin")
    );
    assert_eq!(composite.build_item(Coordinate::new(3, 1)), None);

    assert_eq!(composite.build_header(0).as_deref(), Some("Banner"));
    assert_eq!(composite.build_header(2).as_deref(), Some("-- c --"));
    assert_eq!(composite.build_header(9), None);

    assert_eq!(
        composite.locate(Coordinate::new(2, 0)),
        Some((list, Coordinate::new(1, 0)))
    );
    assert_eq!(composite.to_global(bottom, Coordinate::flat(0)), Coordinate::new(3, 0));

    assert_eq!(composite.index_titles(), ["a", "c"]);
    assert_eq!(composite.index_title_target(1), Some(Coordinate::new(2, 0)));
    assert_eq!(composite.index_title_target(2), None);
}

#[test]
fn composite_rejects_unknown_ids_and_wrong_types() {
    let mut composite = Composite::<String>::new();
    let list = composite.push(people(vec![('a', "ann")]));

    assert!(composite.update::<Banner>(list, |s| s.set_data(vec![])).is_none());
    assert!(composite.section::<Banner>(list).is_none());
    assert!(composite.section::<People>(list).is_some());

    assert!(composite.remove(list).is_some());
    assert!(!composite.contains(list));
    assert!(composite.update::<People>(list, |s| s.set_data(vec![])).is_none());
    assert!(composite.is_empty());
    assert_eq!(composite.group_count(), 0);
    assert_eq!(composite.build_item(Coordinate::new(0, 0)), None);
}

#[test]
fn exclusivity_follows_membership() {
    let mut composite = Composite::<String>::new();
    let first = composite.push(banner(Vec::new()));
    assert!(composite.section::<Banner>(first).unwrap().is_exclusive());

    let second = composite.insert(0, banner(Vec::new()));
    assert!(!composite.section::<Banner>(first).unwrap().is_exclusive());
    assert_eq!(composite.ids().collect::<Vec<_>>(), [second, first]);

    // Not the only section: the first data animates as a plain insertion.
    let update = composite
        .update::<Banner>(first, |s| s.set_data(vec!["hello"]))
        .unwrap();
    let edit = update.edit().unwrap();
    assert_eq!(edit.insertions, [Coordinate::new(1, 0)]);
    assert!(!edit.had_data);

    composite.remove(second);
    assert!(composite.section::<Banner>(first).unwrap().is_exclusive());
    assert_eq!(composite.offset(first).unwrap().base.group, 0);
}

#[test]
fn queue_serializes_snapshots() {
    let mut queue = UpdateQueue::new(QueuePolicy::Queue);
    queue.push(1);
    queue.push(2);

    assert_eq!(queue.begin(), Some(1));
    assert!(queue.is_in_flight());
    queue.push(3);
    assert_eq!(queue.begin(), None);
    queue.finish();

    let mut applied = Vec::new();
    queue.drain_with(|s| applied.push(s));
    assert_eq!(applied, [2, 3]);
    assert!(queue.is_idle());
}

#[test]
fn supersede_keeps_only_the_latest_pending_snapshot() {
    let mut queue = UpdateQueue::new(QueuePolicy::Supersede);
    queue.push("a");
    assert_eq!(queue.begin(), Some("a"));
    queue.push("b");
    queue.push("c");
    assert_eq!(queue.pending_len(), 1);
    queue.finish();
    assert_eq!(queue.begin(), Some("c"));
    queue.finish();
    assert!(queue.is_idle());
}

#[test]
fn producer_errors_are_returned_not_queued() {
    let mut queue: UpdateQueue<Vec<u8>> = UpdateQueue::default();
    assert_eq!(queue.push_result::<&str>(Ok(vec![1])), Ok(()));
    assert_eq!(queue.push_result(Err("offline")), Err("offline"));
    assert_eq!(queue.pending_len(), 1);
    assert_eq!(queue.begin(), Some(vec![1]));
}

#[test]
fn queue_feeds_a_section() {
    let mut queue = UpdateQueue::new(QueuePolicy::Queue);
    let mut section = people(Vec::new());
    let mut sink: Vec<ViewUpdate> = Vec::new();

    queue.push(vec![('a', "ann")]);
    queue.push(vec![('a', "ann"), ('b', "bea")]);
    queue.drain_with(|snapshot| section.set_data(snapshot).apply_to(&mut sink));

    assert_eq!(
        sink,
        [
            ViewUpdate::Reload,
            ViewUpdate::Batch(batch(vec![1], vec![], vec![], vec![]))
        ]
    );
}
