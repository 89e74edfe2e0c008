// dojo-api: Async Rust client for the Dojo learner-portal backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod courses;
mod enterprise;

pub use client::DojoClient;
pub use error::Error;
pub use models::{
    CatalogResponse, CourseRequestBody, CourseWire, EnterpriseCustomerWire, LearningPathWire,
    UserWire,
};
pub use transport::{TlsMode, TransportConfig};
