//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el servicio
//! CRUD genérico configurado por dominio y la autenticación.

pub mod accident_service;
pub mod auth_service;
pub mod crud_service;
pub mod insurance_service;
pub mod jwt_service;
pub mod vehicle_service;

pub use accident_service::AccidentService;
pub use auth_service::AuthService;
pub use crud_service::{CrudService, IdRequest, Resource, UpdateRequest};
pub use insurance_service::InsuranceService;
pub use jwt_service::{JwtConfig, JwtService, TokenKind};
pub use vehicle_service::VehicleService;
