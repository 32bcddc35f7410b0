//! Utilidades de validación
//!
//! Las reglas por campo se declaran con `#[derive(Validate)]` en los requests;
//! aquí viven los helpers compartidos por todos los dominios.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Error de identificador inválido, reportado sobre el campo `id`
pub fn invalid_id_error(resource: &str) -> ValidationErrors {
    let mut error = ValidationError::new("invalid_id");
    error.message = Some(Cow::Owned(format!("invalid {} ID", resource)));

    let mut errors = ValidationErrors::new();
    errors.add("id", error);
    errors
}

/// Verificar que un identificador sea distinto de cero
pub fn ensure_valid_id(id: u64, resource: &str) -> Result<(), ValidationErrors> {
    if id == 0 {
        return Err(invalid_id_error(resource));
    }
    Ok(())
}

/// Construir un error de validación con código y mensaje propios
pub fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}
