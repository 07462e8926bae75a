// Managed favorites state managers
// Managers handle stateful editing of the favorites collection.

pub mod favorites_manager;
