use serde::{Deserialize, Serialize};

use crate::models::auth::{LoginRequest, RegisterRequest, TokenPair};

// Register request
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterMessage {
    pub username: String,
    pub password: String,
    pub vehicle_id_number: String,
    pub year_of_circulation: i32,
    pub wilaya_number: i32,
    pub owner_name: String,
    pub owner_address: String,
    pub chip_serial: String,
}

impl From<RegisterMessage> for RegisterRequest {
    fn from(message: RegisterMessage) -> Self {
        Self {
            username: message.username,
            password: message.password,
            vehicle_id_number: message.vehicle_id_number,
            year_of_circulation: message.year_of_circulation,
            wilaya_number: message.wilaya_number,
            owner_name: message.owner_name,
            owner_address: message.owner_address,
            chip_serial: message.chip_serial,
        }
    }
}

// Login request
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginMessage {
    pub username: String,
    pub password: String,
}

impl From<LoginMessage> for LoginRequest {
    fn from(message: LoginMessage) -> Self {
        Self {
            username: message.username,
            password: message.password,
        }
    }
}

// Register / Login response
#[derive(Serialize, Deserialize)]
pub struct TokenPairMessage {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairMessage {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ValidateTokenMessage {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RefreshTokenMessage {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}
