// newtab managers
// Stateful components operating on the links table.

pub mod link_manager;
