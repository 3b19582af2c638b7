// Example: serializing snapshots from a producer that may fail.
use sectional::Coordinate;
use sectional_adapter::{DiffingSection, QueuePolicy, SectionOptions, UpdateQueue, ViewUpdate};

fn main() {
    let mut queue = UpdateQueue::new(QueuePolicy::Supersede);
    let mut section = DiffingSection::new(
        Vec::new(),
        SectionOptions::new(|_: Coordinate, v: &u32| v.to_string()),
    );

    let fetched: [Result<Vec<u32>, &str>; 3] = [Ok(vec![1, 2]), Err("timeout"), Ok(vec![2, 3])];
    for result in fetched {
        if let Err(err) = queue.push_result(result) {
            println!("producer failed: {err}");
        }
    }

    let mut updates: Vec<ViewUpdate> = Vec::new();
    queue.drain_with(|snapshot| section.set_data(snapshot).apply_to(&mut updates));
    println!("applied={updates:?} data={:?}", section.data());
}
