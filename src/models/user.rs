//! Modelo de User
//!
//! Cuenta de un conductor (tabla `users`). El nombre de usuario es único e
//! inmutable; la contraseña solo se guarda como hash bcrypt.

use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};

use super::auth::RegisterRequest;
use super::RecordMeta;
use crate::repositories::Record;

#[derive(Clone, PartialEq, FromRow)]
pub struct User {
    #[sqlx(flatten)]
    pub meta: RecordMeta,
    pub username: String,
    pub password_hash: String,
    pub vehicle_id_number: String,
    pub year_of_circulation: i32,
    pub wilaya_number: i32,
    pub owner_name: String,
    pub owner_address: String,
    /// Número de serie del chip de la carte grise
    pub chip_serial: String,
}

impl User {
    /// Construye el usuario a partir del registro ya validado y del hash calculado
    pub fn from_registration(request: RegisterRequest, password_hash: String) -> Self {
        Self {
            meta: RecordMeta::unsaved(),
            username: request.username,
            password_hash,
            vehicle_id_number: request.vehicle_id_number,
            year_of_circulation: request.year_of_circulation,
            wilaya_number: request.wilaya_number,
            owner_name: request.owner_name,
            owner_address: request.owner_address,
            chip_serial: request.chip_serial,
        }
    }
}

// El hash no debe acabar en los logs
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.meta.id)
            .field("username", &self.username)
            .field("wilaya_number", &self.wilaya_number)
            .finish_non_exhaustive()
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "username",
        "password_hash",
        "vehicle_id_number",
        "year_of_circulation",
        "wilaya_number",
        "owner_name",
        "owner_address",
        "chip_serial",
    ];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn bind_columns<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        query
            .bind(&self.username)
            .bind(&self.password_hash)
            .bind(&self.vehicle_id_number)
            .bind(self.year_of_circulation)
            .bind(self.wilaya_number)
            .bind(&self.owner_name)
            .bind(&self.owner_address)
            .bind(&self.chip_serial)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("users_username_key", self.username.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::tests::valid_registration;

    #[test]
    fn test_debug_hides_password_hash() {
        let user = User::from_registration(valid_registration(), "$2b$04$secret-hash".to_string());
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("karim16"));
        assert!(!rendered.contains("secret-hash"));
    }
}
