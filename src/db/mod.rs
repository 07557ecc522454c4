//! Data access layer
//!
//! Repositories own all SQL; business rules live in `services`.

pub mod categories;
pub mod resources;
pub mod services;
pub mod textings;

pub use categories::CategoryRepository;
pub use resources::ResourceRepository;
pub use services::ServiceRepository;
pub use textings::TextingRepository;
