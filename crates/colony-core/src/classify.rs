//! Diagnostic messages for host outcome codes.

use colony_types::ReturnCode;

/// Map a host outcome code to a diagnostic message.
///
/// Total over the outcome-code domain: codes outside the known table
/// ([`ReturnCode::Other`]) fall back to a generic message rather than
/// failing. Pure, no side effects.
pub const fn message(code: ReturnCode) -> &'static str {
    match code {
        ReturnCode::Ok => "The operation has been scheduled successfully.",
        ReturnCode::NotOwner => "The requesting colony does not own this entity.",
        ReturnCode::NameExists => "There is an agent with the same name already.",
        ReturnCode::Busy => "The facility is already producing another agent.",
        ReturnCode::NotEnoughResources => {
            "The colony stores do not hold enough to cover the requested build."
        }
        ReturnCode::InvalidArgs => "The build configuration or name is malformed.",
        ReturnCode::AuthorityTooLow => {
            "The colony authority level is insufficient to use this facility."
        }
        ReturnCode::Other(_) => "Unknown host outcome.",
    }
}
