//! Data Transfer Objects
//!
//! Estructuras de entrada/salida de la API.

pub mod route_dto;

pub use route_dto::*;
