mod walk;

pub use walk::build_local_inventory;
