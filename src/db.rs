pub mod store;
pub use store::{CatalogStore, CustomerStore, RepairStore};
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod repair_repo;
pub use repair_repo::RepairRepository;
pub mod memory;
pub use memory::InMemoryStore;
