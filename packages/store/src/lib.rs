pub mod accounts;
pub mod availability;
pub mod config;
pub mod error;
pub mod kv;
pub mod marketplace;
pub mod models;
pub mod password;
pub mod profiles;
pub mod requests;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use accounts::{SignupData, UserUpdate, DEMO_CLIENT_EMAIL, DEMO_INSPECTOR_EMAIL};
pub use availability::{
    booking_schedule_text, format_12_hour, BookingDetails, Period, Repeat, SlotTemplate, SlotTime,
};
pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use kv::KvStore;
pub use marketplace::Marketplace;
pub use models::{
    Availability, ClientContact, ContactInfo, InspectorProfile, Property, PropertyType, Request,
    RequestStatus, RequestType, Role, Schedule, Session, TimeSlot, User,
};
pub use profiles::{ProfileFilter, ProfileUpdate};
pub use requests::{schedule_datetime, NewRequest, RequestFilter, RequestUpdate};
