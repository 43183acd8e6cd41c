//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y validación de origen.

pub mod cors;

pub use cors::*;
