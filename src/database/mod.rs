pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;
pub use repository::Repository;
