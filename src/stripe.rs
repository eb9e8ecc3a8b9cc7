//! Stripe API key validation and local webhook secret retrieval.
//!
//! The webhook secret comes from running the Stripe CLI image in a throwaway
//! container:
//!
//! ```text
//! docker run --rm stripe/stripe-cli --api-key=sk_... listen --print-secret \
//!     --forward-to http://localhost:3000/api/stripe/webhook
//! ```

use crate::config::StripeSection;
use crate::error::{Result, SetupError};
use crate::process::{CommandSpec, ProcessRunner};

/// Prefix every Stripe secret key carries.
pub const API_KEY_PREFIX: &str = "sk_";

/// Prefix every webhook signing secret carries.
pub const WEBHOOK_SECRET_PREFIX: &str = "whsec_";

const DASHBOARD_URL: &str = "https://dashboard.stripe.com/";

/// Reject anything that is not a Stripe secret key.
pub fn validate_api_key(key: &str) -> Result<()> {
    if key.starts_with(API_KEY_PREFIX) {
        return Ok(());
    }

    Err(SetupError::InvalidInput(format!(
        "This is not a valid Stripe API key. It should start with '{}'. Get your Stripe key from: {}",
        API_KEY_PREFIX, DASHBOARD_URL
    )))
}

/// Short form of a key that is safe to log.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(API_KEY_PREFIX.len() + 1).collect();
    format!("{}…", visible)
}

/// Webhook forwarding target for a base URL.
pub fn forward_url(base_url: &str, webhook_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        webhook_path.trim_start_matches('/')
    )
}

/// The container invocation that prints a webhook secret.
pub fn listen_command(stripe: &StripeSection, api_key: &str, base_url: &str) -> CommandSpec {
    CommandSpec::new(&stripe.docker).args([
        "run".to_string(),
        "--rm".to_string(),
        stripe.image.clone(),
        format!("--api-key={}", api_key),
        "listen".to_string(),
        "--print-secret".to_string(),
        "--forward-to".to_string(),
        forward_url(base_url, &stripe.webhook_path),
    ])
}

/// Run the Stripe CLI and return the trimmed secret it prints.
pub fn fetch_webhook_secret(
    runner: &dyn ProcessRunner,
    stripe: &StripeSection,
    api_key: &str,
    base_url: &str,
) -> Result<String> {
    let command = listen_command(stripe, api_key, base_url);
    tracing::info!(image = %stripe.image, key = %mask_key(api_key), "requesting webhook secret");

    let context = "Failed getting a Stripe local webhook secret";
    let output = runner.run(&command)?.check(&stripe.docker, context)?;

    let secret = output.stdout.trim().to_string();
    if !secret.starts_with(WEBHOOK_SECRET_PREFIX) {
        return Err(SetupError::UnexpectedOutput {
            context: context.to_string(),
            output: secret,
        });
    }

    Ok(secret)
}
