use rand::Rng;
use serde::Serialize;
use serde_json::json;

use crate::context::Context;
use crate::logging::Logger;

pub const DEFAULT_ACCOUNT_USERNAME: &str = "ocm-load";

#[derive(Debug, Clone, Serialize)]
pub struct AccessReviewRequest<'a> {
    pub account_username: &'a str,
    pub action: &'a str,
    pub resource_type: &'a str,
}

/// Access review asking whether `account_username` may read subscriptions.
///
/// A serialization failure is logged and yields an empty body, so the test
/// still runs and the server reports the problem.
#[must_use]
pub fn access_review_body(account_username: &str, logger: &Logger, ctx: &Context) -> Vec<u8> {
    let request = AccessReviewRequest {
        account_username,
        action: "get",
        resource_type: "Subscription",
    };
    match serde_json::to_vec(&request) {
        Ok(body) => body,
        Err(err) => {
            crate::log_error!(logger, ctx, "marshaling `access-review` request: {}", err);
            Vec::new()
        }
    }
}

fn random_id<R: Rng>(rng: &mut R) -> String {
    format!("{:032x}", rng.r#gen::<u128>())
}

#[must_use]
pub fn cluster_registration_body<R: Rng>(rng: &mut R) -> Vec<u8> {
    json!({ "cluster_id": random_id(rng) }).to_string().into_bytes()
}

#[must_use]
pub fn cluster_body<R: Rng>(rng: &mut R) -> Vec<u8> {
    let id = random_id(rng);
    let suffix = id.get(..8).unwrap_or(id.as_str());
    json!({
        "name": format!("ocm-load-{}", suffix),
        "managed": true,
    })
    .to_string()
    .into_bytes()
}
