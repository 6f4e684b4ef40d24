//! Outbound adapters implementing domain ports against external systems.
//!
//! PostgreSQL persistence lives under [`persistence`].

pub mod persistence;
