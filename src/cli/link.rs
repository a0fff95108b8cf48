use crate::link;

/// Execute the `link` command: print the meeting link for a name.
pub fn execute(name: Option<&str>) {
    println!("{}", link::meeting_link(name));
}
