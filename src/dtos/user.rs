use serde::{Deserialize, Serialize};

/// Both fields are optional so that absent values surface as a 400 rather
/// than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}
