//! Infrastructure layer - remote store adapters

pub mod remote;
