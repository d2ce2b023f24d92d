//! Custody web3-connection API client.
//!
//! The custodial signing backend is an external collaborator; this crate
//! consumes its connection-management contract (create, submit, remove a
//! web3 connection) through the `CustodyApi` trait, with a reqwest-backed
//! implementation and a recording mock for tests.

pub mod client;
pub mod error;

pub use client::{
    BoxFuture, CustodyApi, CustodyClient, DynCustodyApi, MockCustodyApi, Web3ConnectionCreated,
    Web3ConnectionRequest,
};
pub use error::{CustodyError, CustodyResult};
