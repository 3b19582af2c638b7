// Example: flat diff, then replaying the script.
use sectional::SectionedEdit;
use sectional::sequence::{apply, diff, patch};

fn main() {
    let from = ["a", "b", "c"];
    let to = ["a", "c", "d"];

    let changes = diff(&from, &to, |a, b| a == b);
    println!("changes={changes:?}");

    let edits = patch(&from, &to, |a, b| a == b);
    println!("replayed={:?}", apply(&from, &edits));

    let edit = SectionedEdit::flat(&[], &["x"], |a: &&str, b: &&str| a == b);
    println!("first data: needs_reload={}\n{edit}", edit.needs_reload());
}
