// Example: components sharing one group numbering, with a rebase after a resize.
use sectional::{Coordinate, Extent, Registry};

struct Region {
    name: &'static str,
    groups: usize,
}

impl Extent for Region {
    fn extent(&self) -> usize {
        self.groups
    }
}

fn main() {
    let mut registry = Registry::new();
    let header = registry.push(Region {
        name: "header",
        groups: 2,
    });
    let body = registry.push(Region {
        name: "body",
        groups: 3,
    });
    println!("body offset={:?}", registry.offset(body));

    registry.update(header, |r| r.groups = 1);
    println!("after shrink: body offset={:?}", registry.offset(body));

    for group in 0..registry.total_groups() {
        if let Some((region, local)) = registry.locate_component(Coordinate::new(group, 0)) {
            println!("global group {group} -> {} {local}", region.name);
        }
    }
}
