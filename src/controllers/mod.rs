//! Controllers
//!
//! Handlers HTTP de la API.

pub mod route_controller;
