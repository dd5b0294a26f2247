//! Network messages - communication between App and Network layers

use crate::composer::RequestDescriptor;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Send a composed request once, no retries
    ExecuteRequest {
        id: u64,
        request: RequestDescriptor,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// 2xx response
    Success {
        id: u64,
        status: u16,
        body: String,
        time_ms: u64,
    },
    /// Transport failure or non-2xx response, shown in place of a body
    Error {
        id: u64,
        status: Option<u16>,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NetworkResponse::Success { .. })
    }
}
