use serde::{Deserialize, Serialize};

/// Partner identifier attached to every donation the console creates.
pub const CO_OP: &str = "STUDIO-MATIC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub role: String,
    pub role_rank: u8,
}

/// `GET /users/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Me {
    #[serde(default)]
    pub id: Option<u64>,
    pub email: String,
    pub role: String,
    pub role_rank: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: u64,
    pub coins: u64,
    pub income_eur: f64,
    pub co_op: String,
    pub donated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supporter {
    pub id: u64,
    pub name: String,
    pub donation_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedInvite {
    pub code: String,
    pub role: String,
}

// -- Request bodies --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub coins: u64,
    pub income_eur: f64,
    pub co_op: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupporterRequest {
    pub name: String,
    pub donation_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub invite: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteRequest<'a> {
    pub role: &'a str,
}

/// `PATCH /users/me` carries exactly one of the two fields.
#[derive(Debug, Clone, Serialize)]
pub struct AccountPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

// -- Response bodies --

#[derive(Debug, Clone, Deserialize)]
pub struct IdResponse {
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InviteResponse {
    pub code: String,
}
