//! Utilidades del sistema
//!
//! Manejo de errores y helpers de validación comunes a todos los dominios.

pub mod errors;
pub mod extract;
pub mod validation;

pub use errors::{AppError, AppResult};
pub use extract::WireJson;
