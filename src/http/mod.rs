//! HTTP surface for the job graph service

pub mod handler;
pub mod server;

pub use server::{router, HttpServer};
