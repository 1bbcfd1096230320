//! Offerings module - the public service catalog.

mod offerings_model;
mod offerings_service;
mod offerings_traits;

pub use offerings_model::{
    NewOfferingFeature, NewServiceOffering, OfferingDetail, OfferingFeature, OfferingFilters,
    ServiceOffering,
};
pub use offerings_service::OfferingService;
pub use offerings_traits::{OfferingRepositoryTrait, OfferingServiceTrait};
