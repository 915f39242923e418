// Interview Record Store: persistence plus the CRUD endpoints over it.

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod store;
