//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod container;
mod product_service;
mod user_service;

pub use container::Services;
pub use product_service::{ProductManager, ProductService};
pub use user_service::{UserManager, UserService};
