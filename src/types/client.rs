//! Client profile types owned by the client directory
//!
//! The engine only reads clients; their type and profile drive the
//! eligibility rules applied when a deposit account is opened.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client identifier
pub type ClientId = String;

/// Legal nature of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
    Personal,
    Business,
}

/// Commercial segment of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientProfile {
    Standard,
    Vip,
    Pyme,
}

impl ClientProfile {
    /// Whether the profile needs an existing credit line before opening a
    /// deposit account
    pub fn requires_credit_line(self) -> bool {
        matches!(self, ClientProfile::Vip | ClientProfile::Pyme)
    }
}

/// Read-only view of a client as returned by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "type")]
    pub client_type: ClientType,
    pub profile: ClientProfile,
}

impl Client {
    pub fn new(client_type: ClientType, profile: ClientProfile) -> Self {
        Client {
            client_type,
            profile,
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientType::Personal => f.write_str("PERSONAL"),
            ClientType::Business => f.write_str("BUSINESS"),
        }
    }
}

impl FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PERSONAL" => Ok(ClientType::Personal),
            "BUSINESS" => Ok(ClientType::Business),
            _ => Err(format!("Unknown client type '{}'", s)),
        }
    }
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientProfile::Standard => f.write_str("STANDARD"),
            ClientProfile::Vip => f.write_str("VIP"),
            ClientProfile::Pyme => f.write_str("PYME"),
        }
    }
}

impl FromStr for ClientProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STANDARD" => Ok(ClientProfile::Standard),
            "VIP" => Ok(ClientProfile::Vip),
            "PYME" => Ok(ClientProfile::Pyme),
            _ => Err(format!("Unknown client profile '{}'", s)),
        }
    }
}
