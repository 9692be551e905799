//! Network messages - communication between App and Network layers

use crate::error::FetchError;
use crate::models::{Character, Listing, Product};

/// Which remote read to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch {
    /// `GET /character`
    ListCharacters,
    /// `GET /character/{id}`
    Character(u64),
    /// `GET /products?limit={n}`
    ListProducts { limit: Option<usize> },
    /// `GET /products/{id}`
    Product(u64),
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Perform a fetch; the reply carries the same id
    Execute { id: u64, fetch: Fetch },
    /// Abandon a pending fetch
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Decoded result of a successful fetch
#[derive(Debug, Clone)]
pub enum Payload {
    Characters(Listing<Character>),
    Character(Character),
    Products(Listing<Product>),
    Product(Product),
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Success {
        id: u64,
        payload: Payload,
        time_ms: u64,
    },
    Failure {
        id: u64,
        error: FetchError,
        time_ms: u64,
    },
    /// Fetch was cancelled before it completed
    Cancelled {
        id: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Failure { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
