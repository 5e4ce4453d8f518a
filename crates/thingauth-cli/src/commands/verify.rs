//! `thingauth verify`: check a device signature over a message.

use anyhow::Result;
use serde::Serialize;
use thingauth_auth::authenticator::ThingAuthenticator;

/// Result of a verification, as printed by the CLI.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Device name as given on the command line.
    pub thing: String,
    /// Whether the signature verified.
    pub verified: bool,
}

impl VerifyOutcome {
    /// Render as a single line of text or JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string(self)?);
        }
        Ok(if self.verified { "verified" } else { "rejected" }.to_owned())
    }
}

/// Run `thingauth verify`.
pub async fn run_verify(
    auth: &ThingAuthenticator,
    thing: &str,
    message: &[u8],
    signature_hex: &str,
) -> VerifyOutcome {
    let verified = auth.authenticate_name(thing, message, signature_hex).await;
    VerifyOutcome {
        thing: thing.to_owned(),
        verified,
    }
}
