//! HokejPWG sign-up client.
//!
//! ARCHITECTURE
//! ============
//! The roster lives in an external PostgREST table; this crate holds only
//! client-side logic. `roster` partitions the fetched rows into teams,
//! `signup` turns a form into one insert, `identity` remembers the last-used
//! form fields, and `page` ties them together the way the sign-up page does.
//! The `hokej` binary drives `page` from the terminal.

pub mod config;
pub mod identity;
pub mod page;
pub mod poller;
pub mod registration;
pub mod render;
pub mod roster;
pub mod signup;
pub mod store;
