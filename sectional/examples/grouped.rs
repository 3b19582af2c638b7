// Example: grouping by key and diffing two grouped snapshots.
use sectional::{Alignment, GroupedDiff, GroupedSnapshot};

fn main() {
    let old = GroupedSnapshot::from_unsorted(
        [("fruit", "apple"), ("veg", "leek"), ("fruit", "pear")],
        |e| e.0,
    );
    let new = GroupedSnapshot::from_unsorted(
        [("veg", "leek"), ("fruit", "pear"), ("nut", "pecan"), ("veg", "kale")],
        |e| e.0,
    );

    for (key, group) in new.iter() {
        println!("{key}: {group:?}");
    }

    let edit = GroupedDiff::new(&old, &new).diff(|a, b| a == b);
    println!("grouped alignment:\n{edit}");

    let edit = GroupedDiff::new(&old, &new)
        .with_alignment(Alignment::Original)
        .diff(|a, b| a == b);
    println!("original alignment:\n{edit}");

    let (keys, groups) = old.reconstruct(&edit, &new);
    println!("rebuilt keys={keys:?} groups={groups:?}");
}
