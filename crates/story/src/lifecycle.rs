//! The Command state machine and the remote system's rejection signatures.
//!
//! A command's status is one of `OPEN`, `PAYING`, `CLOSED`. The legal
//! transitions exercised by the stories are `OPEN → PAYING → CLOSED` and
//! the `CLOSED → OPEN` reopen; self-transitions are rejected. Table
//! reassignment and order placement are further guarded by status, by
//! table identity and by company ownership.
//!
//! Negative steps assert on a [`RejectSignature`]: the status code is the
//! pass/fail criterion, while the (locale-specific) message text is a
//! second-tier check — a divergent message with the right status still
//! passes, but the divergence is preserved in the step detail.

use comanda_client::ApiResponse;

// ──────────────────────────────────────────────
// CommandStatus
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Open,
    Paying,
    Closed,
}

impl CommandStatus {
    /// Lowercase key as reported in entity bodies (`status.key`).
    pub fn key(&self) -> &'static str {
        match self {
            CommandStatus::Open => "open",
            CommandStatus::Paying => "paying",
            CommandStatus::Closed => "closed",
        }
    }

    /// Uppercase value sent in status-update requests.
    pub fn request_value(&self) -> &'static str {
        match self {
            CommandStatus::Open => "OPEN",
            CommandStatus::Paying => "PAYING",
            CommandStatus::Closed => "CLOSED",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "open" => Some(CommandStatus::Open),
            "paying" => Some(CommandStatus::Paying),
            "closed" => Some(CommandStatus::Closed),
            _ => None,
        }
    }
}

/// Legal status transitions, as enforced by the remote system.
pub fn is_legal_transition(from: CommandStatus, to: CommandStatus) -> bool {
    use CommandStatus::*;
    matches!((from, to), (Open, Paying) | (Paying, Closed) | (Closed, Open))
}

// ──────────────────────────────────────────────
// RejectSignature
// ──────────────────────────────────────────────

/// What a negative step expects of the message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageExpectation {
    /// The exact observed text; divergence is noted but non-fatal.
    Exact(&'static str),
    /// Any non-empty `message` field must be present.
    Present,
    /// The status code alone decides.
    Ignored,
}

/// Expected rejection: status code plus message expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectSignature {
    pub status: u16,
    pub message: MessageExpectation,
}

/// Verdict of matching a response against a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureMatch {
    /// Status and message both as anticipated.
    Full,
    /// Status matched; message diverged from the expected text.
    Divergent { got: Option<String> },
    /// Wrong status, or a required message was missing. The carried text
    /// is diagnostic detail.
    Mismatch { detail: String },
}

impl RejectSignature {
    pub fn new(status: u16, message: MessageExpectation) -> Self {
        RejectSignature { status, message }
    }

    pub fn status_only(status: u16) -> Self {
        RejectSignature::new(status, MessageExpectation::Ignored)
    }

    pub fn check(&self, response: &ApiResponse) -> SignatureMatch {
        if response.status != self.status {
            return SignatureMatch::Mismatch {
                detail: format!(
                    "expected status {}, got {}. {}",
                    self.status,
                    response.status,
                    response.message().unwrap_or_default()
                ),
            };
        }
        match &self.message {
            MessageExpectation::Ignored => SignatureMatch::Full,
            MessageExpectation::Present => match response.message() {
                Some(m) if !m.is_empty() => SignatureMatch::Full,
                _ => SignatureMatch::Mismatch {
                    detail: format!("status {} without an error message", response.status),
                },
            },
            MessageExpectation::Exact(expected) => match response.message() {
                Some(m) if m == *expected => SignatureMatch::Full,
                got => SignatureMatch::Divergent { got },
            },
        }
    }
}

// ──────────────────────────────────────────────
// Observed signatures
// ──────────────────────────────────────────────

pub fn same_table_rejection() -> RejectSignature {
    RejectSignature::new(
        400,
        MessageExpectation::Exact("A comanda já está na mesa de destino."),
    )
}

pub fn cross_company_table_rejection() -> RejectSignature {
    RejectSignature::new(
        400,
        MessageExpectation::Exact("A comanda e a mesa de destino devem pertencer à mesma empresa."),
    )
}

pub fn table_change_requires_open_rejection() -> RejectSignature {
    RejectSignature::new(
        400,
        MessageExpectation::Exact("A comanda deve estar aberta para ter sua mesa alterada."),
    )
}

pub fn order_on_closed_command_rejection() -> RejectSignature {
    RejectSignature::new(
        400,
        MessageExpectation::Exact("Não é possível adicionar um pedido para um comando fechado"),
    )
}

pub fn product_not_found_rejection() -> RejectSignature {
    RejectSignature::new(404, MessageExpectation::Exact("Produto não encontrado"))
}

/// Message returned when inviting a user who already works for the
/// company; step 5 treats this as a tolerable outcome, not a rejection.
pub const ALREADY_EMPLOYEE_MESSAGE: &str = "Usuário já é funcionário do restaurante";

/// Self-transition rejection, e.g. open → open.
pub fn self_transition_rejection(status: CommandStatus) -> RejectSignature {
    // The remote formats the message with the lowercase status key twice.
    let message: &'static str = match status {
        CommandStatus::Open => "Transição de status de 'open' para 'open' não é permitida.",
        CommandStatus::Paying => "Transição de status de 'paying' para 'paying' não é permitida.",
        CommandStatus::Closed => "Transição de status de 'closed' para 'closed' não é permitida.",
    };
    RejectSignature::new(400, MessageExpectation::Exact(message))
}
