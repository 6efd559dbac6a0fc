use crate::args::HttpMethod;
use crate::error::ValidationError;

/// How a test case issues its requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Same request every time.
    StaticEndpoint,
    /// Fresh registration body per request.
    RegisterNewCluster,
    /// Fresh cluster body per request.
    CreateCluster,
    /// Paged GET over the cluster collection.
    ListClusters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    AccessReview,
    ClusterRegistration,
    Cluster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase {
    pub name: &'static str,
    pub path: &'static str,
    pub method: HttpMethod,
    pub body: BodyKind,
    pub handler: HandlerKind,
}

/// Every known test case, in execution order.
pub static TEST_CASES: [TestCase; 7] = [
    TestCase {
        name: "self-access-token",
        path: "/api/accounts_mgmt/v1/access_token",
        method: HttpMethod::Post,
        body: BodyKind::Empty,
        handler: HandlerKind::StaticEndpoint,
    },
    TestCase {
        name: "list-subscriptions",
        path: "/api/accounts_mgmt/v1/subscriptions",
        method: HttpMethod::Get,
        body: BodyKind::Empty,
        handler: HandlerKind::StaticEndpoint,
    },
    TestCase {
        name: "access-review",
        path: "/api/authorizations/v1/access_review",
        method: HttpMethod::Post,
        body: BodyKind::AccessReview,
        handler: HandlerKind::StaticEndpoint,
    },
    TestCase {
        name: "register-new-cluster",
        path: "/api/accounts_mgmt/v1/cluster_registrations",
        method: HttpMethod::Post,
        body: BodyKind::ClusterRegistration,
        handler: HandlerKind::RegisterNewCluster,
    },
    TestCase {
        name: "create-cluster",
        path: "/api/clusters_mgmt/v1/clusters",
        method: HttpMethod::Post,
        body: BodyKind::Cluster,
        handler: HandlerKind::CreateCluster,
    },
    TestCase {
        name: "list-clusters",
        path: "/api/clusters_mgmt/v1/clusters",
        method: HttpMethod::Get,
        body: BodyKind::Empty,
        handler: HandlerKind::ListClusters,
    },
    TestCase {
        name: "get-current-account",
        path: "/api/accounts_mgmt/v1/current_account",
        method: HttpMethod::Get,
        body: BodyKind::Empty,
        handler: HandlerKind::StaticEndpoint,
    },
];

#[must_use]
pub fn all() -> &'static [TestCase] {
    &TEST_CASES
}

#[must_use]
pub fn find(name: &str) -> Option<&'static TestCase> {
    TEST_CASES.iter().find(|case| case.name == name)
}

#[must_use]
pub fn names() -> Vec<&'static str> {
    TEST_CASES.iter().map(|case| case.name).collect()
}

/// Resolve requested names to cases, keeping the requested order and
/// dropping repeats. An empty request selects every case.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownTest`] for the first name that is not
/// registered.
pub fn select<S>(requested: &[S]) -> Result<Vec<&'static TestCase>, ValidationError>
where
    S: AsRef<str>,
{
    if requested.is_empty() {
        return Ok(all().iter().collect());
    }

    let mut selected: Vec<&'static TestCase> = Vec::with_capacity(requested.len());
    for name in requested {
        let name = name.as_ref().trim();
        let case = find(name).ok_or_else(|| ValidationError::UnknownTest {
            name: name.to_owned(),
            available: names().join(", "),
        })?;
        if !selected.iter().any(|existing| existing.name == case.name) {
            selected.push(case);
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_ordered() -> Result<(), String> {
        let listed = names();
        if listed.first() != Some(&"self-access-token") {
            return Err(format!("Unexpected first test: {:?}", listed.first()));
        }
        if listed.last() != Some(&"get-current-account") {
            return Err(format!("Unexpected last test: {:?}", listed.last()));
        }
        let mut sorted = listed.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != listed.len() {
            return Err("Duplicate test names in registry".to_owned());
        }
        Ok(())
    }

    #[test]
    fn select_empty_returns_all() -> Result<(), String> {
        let selected = select::<&str>(&[]).map_err(|err| err.to_string())?;
        if selected.len() != TEST_CASES.len() {
            return Err(format!("Expected all tests, got {}", selected.len()));
        }
        Ok(())
    }

    #[test]
    fn select_keeps_request_order_and_drops_repeats() -> Result<(), String> {
        let selected = select(&["list-clusters", " access-review", "list-clusters"])
            .map_err(|err| err.to_string())?;
        let picked: Vec<&str> = selected.iter().map(|case| case.name).collect();
        if picked != ["list-clusters", "access-review"] {
            return Err(format!("Unexpected selection: {:?}", picked));
        }
        Ok(())
    }

    #[test]
    fn select_rejects_unknown_name() -> Result<(), String> {
        match select(&["list-clusters", "delete-everything"]) {
            Err(ValidationError::UnknownTest { name, available }) => {
                if name != "delete-everything" || !available.contains("create-cluster") {
                    return Err(format!("Unexpected error fields: {} / {}", name, available));
                }
                Ok(())
            }
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(_) => Err("Expected unknown test error".to_owned()),
        }
    }

    #[test]
    fn access_review_posts_a_body() -> Result<(), String> {
        let case = find("access-review").ok_or_else(|| "missing access-review".to_owned())?;
        if case.method != HttpMethod::Post || case.body != BodyKind::AccessReview {
            return Err(format!("Unexpected access-review case: {:?}", case));
        }
        Ok(())
    }
}
