use tracing::{info, warn};

use crate::error::SlashError;
use crate::invocation::Invocation;
use crate::params::extract;
use crate::request::{Envelope, SlashCommandRequest};
use crate::response::{SlackResponse, build_response};

/// Turn a decoded request into its Slack reply.
///
/// Errors are logged under the invocation span before being returned.
pub fn process(
    request: SlashCommandRequest,
    invocation: &Invocation,
) -> Result<SlackResponse, SlashError> {
    let _entered = invocation.span().enter();
    let body_kind = request.body_kind();

    let params = extract(request.body).inspect_err(|e| {
        warn!(error = %e, kind = e.kind(), body_kind, "failed to extract slash command parameters");
    })?;

    info!(
        method = %request.method,
        body_kind,
        params = params.len(),
        "slash command parameters"
    );

    Ok(build_response(&params))
}

/// Run the whole pipeline for any inbound shape.
pub fn respond(envelope: Envelope, invocation: &Invocation) -> Result<SlackResponse, SlashError> {
    let request = {
        let _entered = invocation.span().enter();
        envelope.decode().inspect_err(|e| {
            warn!(error = %e, kind = e.kind(), "failed to decode slash command envelope");
        })?
    };
    process(request, invocation)
}

/// Function-result style entry point: returns the reply as a JSON value.
pub fn handle(
    envelope: Envelope,
    invocation: &Invocation,
) -> Result<serde_json::Value, SlashError> {
    let response = respond(envelope, invocation)?;
    response.to_value().inspect_err(|e| {
        let _entered = invocation.span().enter();
        warn!(error = %e, kind = e.kind(), "failed to serialize slash command response");
    })
}
