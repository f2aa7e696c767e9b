//! Seam to whatever actually draws screens.

use crate::features::navigation::{NavCommand, NavState};

/// Receives navigation commands after the reducer has applied them.
///
/// `nav` is the stack as it stands after `command`.
pub trait NavigationHost {
    fn navigate(&mut self, command: NavCommand, nav: &NavState);
}

/// Records every command, for tests and scripted runs.
impl NavigationHost for Vec<NavCommand> {
    fn navigate(&mut self, command: NavCommand, _nav: &NavState) {
        self.push(command);
    }
}

