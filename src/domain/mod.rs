//! Record types for each entity kind the events company keeps.
//!
//! Each module defines one record (fields, parsing from form input,
//! validation). Records carry no identifier; the owning repository keys
//! them.

pub mod client;
pub mod employee;
pub mod event;
pub mod guest;
pub mod supplier;
pub mod venue;

pub use client::Client;
pub use employee::Employee;
pub use event::Event;
pub use guest::Guest;
pub use supplier::Supplier;
pub use venue::Venue;
