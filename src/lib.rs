//! Backend de constats amiables: vehículos, seguros, accidentes y autenticación
//! expuestos como RPC sobre HTTP.

pub mod config;
pub mod database;
pub mod dto;
pub mod events;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
