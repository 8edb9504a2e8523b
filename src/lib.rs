//! Flat-file record keeping for an events company.
//!
//! Each entity kind (employees, clients, suppliers, guests, events, venues)
//! lives in its own [`Repository`], persisted as one JSON file that is
//! rewritten in full after every change. [`Registry`] opens all of them
//! from a single data directory, and [`cost`] prices a booking.

mod config;
pub mod domain;
mod entity;
mod error;
mod fields;
mod id;
pub mod pricing;
mod registry;
mod repository;
mod storage;

pub use config::{Config, DATA_DIR_ENV, DEFAULT_DATA_DIR};
pub use domain::{Client, Employee, Event, Guest, Supplier, Venue};
pub use entity::{Entity, require};
pub use error::{RepositoryError, Result, ValidationError};
pub use fields::Fields;
pub use id::{Id, IdAllocator, next_id, parse_id};
pub use pricing::{EventType, Quote, Service, cost, quote};
pub use registry::{Registry, RegistryBuilder, RegistryEntity};
pub use repository::Repository;
pub use storage::{DataLayout, load_collection, save_collection};
