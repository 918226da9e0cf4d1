//! Chat request types

use serde::{Deserialize, Serialize};

/// Incoming chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    pub question: String,
}
