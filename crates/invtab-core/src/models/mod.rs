//! Data models for the invtab pipeline.

pub mod config;
pub mod record;

pub use config::InvtabConfig;
pub use record::{
    Cell, Company, DateValue, HeaderFields, LineRecord, MeridianRow, NimbusRow, StellarRow,
};
