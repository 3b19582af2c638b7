// Example: a banner and a grouped contact list stacked into one view.
use sectional::{Coordinate, SectionedEdit};
use sectional_adapter::{
    Composite, DiffingSection, GroupingOptions, GroupingSection, SectionOptions, ViewSink,
};

struct PrintSink;

impl ViewSink for PrintSink {
    fn reload(&mut self) {
        println!("reload");
    }

    fn perform_batch(&mut self, edit: &SectionedEdit) {
        println!("batch:\n{edit}");
    }
}

type Contacts = GroupingSection<&'static str, char, String>;

fn initial(name: &&str) -> char {
    name.chars().next().unwrap_or('#').to_ascii_uppercase()
}

fn main() {
    let mut view = Composite::<String>::new();
    view.push(DiffingSection::new(
        vec!["Favorites"],
        SectionOptions::new(|_: Coordinate, s: &&'static str| format!("* {s}")),
    ));
    let contacts = view.push(GroupingSection::new(
        vec!["bob", "alice", "bea"],
        GroupingOptions::new(initial, |at: Coordinate, s: &&'static str| format!("{at} {s}"))
            .with_header(Some(|_: usize, k: &char| format!("== {k} ==")))
            .with_index_title(Some(|k: &char| k.to_string())),
    ));

    let mut sink = PrintSink;
    if let Some(update) = view.update::<Contacts>(contacts, |s| {
        s.set_data(vec!["bob", "alice", "carol", "bea", "ada"])
    }) {
        update.apply_to(&mut sink);
    }

    println!("index titles={:?}", view.index_titles());
    for group in 0..view.group_count() {
        if let Some(header) = view.build_header(group) {
            println!("{header}");
        }
        for item in 0..view.item_count(group) {
            if let Some(cell) = view.build_item(Coordinate::new(group, item)) {
                println!("  {cell}");
            }
        }
    }
}
