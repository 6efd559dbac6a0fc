use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::cases::{
    BodyKind, HandlerKind, TestCase, access_review_body, cluster_body, cluster_registration_body,
};
use crate::context::Context;
use crate::error::AppResult;
use crate::logging::Logger;

use super::settings::RunSettings;

/// Page size used by the list-clusters handler.
const LIST_PAGE_SIZE: u64 = 100;
/// List requests walk this many pages before starting over.
const LIST_PAGE_SPAN: u64 = 5;

/// A test case with its URL resolved and its fixed body rendered once.
#[derive(Debug)]
pub struct PreparedCase {
    case: &'static TestCase,
    url: Url,
    static_body: Option<Vec<u8>>,
}

impl PreparedCase {
    /// # Errors
    ///
    /// Returns an error when the case path cannot be joined onto the gateway.
    pub fn new(
        case: &'static TestCase,
        settings: &RunSettings,
        logger: &Logger,
        ctx: &Context,
    ) -> AppResult<Self> {
        let url = settings.endpoint(case.path)?;
        let static_body = match case.body {
            BodyKind::AccessReview => Some(access_review_body(
                &settings.account_username,
                logger,
                ctx,
            )),
            BodyKind::Empty | BodyKind::ClusterRegistration | BodyKind::Cluster => None,
        };
        Ok(Self {
            case,
            url,
            static_body,
        })
    }

    #[must_use]
    pub const fn case(&self) -> &'static TestCase {
        self.case
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request number `seq` of this case.
    #[must_use]
    pub fn request(&self, client: &Client, seq: u64) -> RequestBuilder {
        let builder = client.request(self.case.method.to_reqwest(), self.url.clone());
        match self.case.handler {
            HandlerKind::StaticEndpoint => match self.static_body.as_ref() {
                Some(body) if !body.is_empty() => json_body(builder, body.clone()),
                Some(_) | None => builder,
            },
            HandlerKind::RegisterNewCluster => {
                json_body(builder, cluster_registration_body(&mut rand::thread_rng()))
            }
            HandlerKind::CreateCluster => {
                json_body(builder, cluster_body(&mut rand::thread_rng()))
            }
            HandlerKind::ListClusters => {
                let page = seq
                    .checked_rem(LIST_PAGE_SPAN)
                    .unwrap_or(0)
                    .saturating_add(1);
                builder.query(&[("page", page), ("size", LIST_PAGE_SIZE)])
            }
        }
    }
}

fn json_body(builder: RequestBuilder, body: Vec<u8>) -> RequestBuilder {
    builder.header(CONTENT_TYPE, "application/json").body(body)
}

/// Per-test request tallies, shared with in-flight request tasks.
#[derive(Debug, Default)]
pub(super) struct Tally {
    pub(super) sent: AtomicU64,
    pub(super) succeeded: AtomicU64,
    pub(super) rejected: AtomicU64,
    pub(super) failed: AtomicU64,
}

impl Tally {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn load(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

/// Send one request and log how it went: debug on success, warn on a non-2xx
/// status, error when no response arrived.
pub(super) async fn dispatch(
    client: Client,
    prepared: Arc<PreparedCase>,
    seq: u64,
    logger: Arc<Logger>,
    ctx: Context,
    tally: Arc<Tally>,
) {
    let name = prepared.case().name;
    let started = Instant::now();
    Tally::bump(&tally.sent);

    let response = match prepared.request(&client, seq).send().await {
        Ok(response) => response,
        Err(err) => {
            Tally::bump(&tally.failed);
            crate::log_error!(logger, &ctx, "{}: request {} failed: {}", name, seq, err);
            return;
        }
    };
    let status = response.status();
    // Read the body so the measured time covers the whole response.
    if let Err(err) = response.bytes().await {
        Tally::bump(&tally.failed);
        crate::log_error!(
            logger,
            &ctx,
            "{}: reading response {} failed: {}",
            name,
            seq,
            err
        );
        return;
    }

    if status.is_success() {
        Tally::bump(&tally.succeeded);
        crate::log_debug!(
            logger,
            &ctx,
            "{}: {} {} -> {} in {:?}",
            name,
            prepared.case().method,
            prepared.url(),
            status,
            started.elapsed()
        );
    } else {
        Tally::bump(&tally.rejected);
        crate::log_warn!(
            logger,
            &ctx,
            "{}: {} {} returned {}",
            name,
            prepared.case().method,
            prepared.url(),
            status
        );
    }
}
