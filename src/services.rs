pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod reference_allocator;
pub use reference_allocator::ReferenceAllocator;
pub mod repair_service;
pub use repair_service::RepairService;
