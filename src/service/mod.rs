//! Mapper: generic record CRUD using the safe SQL builder.

mod mapper;
mod validation;
pub use mapper::Mapper;
pub use validation::RequestValidator;
