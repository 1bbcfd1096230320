//! SQLite storage implementation for the service catalog.

mod model;
mod repository;

pub use model::{
    NewOfferingFeatureDB, NewServiceOfferingDB, OfferingFeatureDB, ServiceOfferingDB,
};
pub use repository::OfferingRepository;
