//! Declarative table of load-test cases and their request bodies.
mod bodies;
mod registry;

pub use bodies::{
    AccessReviewRequest, DEFAULT_ACCOUNT_USERNAME, access_review_body, cluster_body,
    cluster_registration_body,
};
pub use registry::{BodyKind, HandlerKind, TEST_CASES, TestCase, all, find, names, select};
