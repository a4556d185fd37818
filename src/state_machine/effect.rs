//! Effects produced by state transitions

use super::RequestId;
use crate::llm::GatewayError;
use crate::topic::Topic;
use crate::transcript::Turn;

/// Effects to be executed after a state transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn(Turn),

    /// Drop every turn from the transcript
    ClearTranscript,

    /// Send `[system(topic)] + transcript` to the completion gateway
    RequestCompletion { request_id: RequestId, topic: Topic },

    /// Tell the user the turn failed
    ReportError(GatewayError),
}
