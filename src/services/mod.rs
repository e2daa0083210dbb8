// newtab services
// Stateless helpers that talk to the outside world.

pub mod favicon_resolver;
