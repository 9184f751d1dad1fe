use std::env;
use std::str::FromStr;

/// Values the suites use when building fixtures and requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Path prefix the admin controllers are mounted under
    pub route_prefix: String,
    /// Id of the stubbed record (and of newly built records)
    pub record_id: i64,
    /// Id used for the "record not found" examples
    pub invalid_id: i64,
    /// Canned serialization returned by every double's `to_xml`
    pub canned_xml: String,
    /// Value returned by the model's `count`
    pub record_count: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            route_prefix: "/admin".to_string(),
            record_id: 1,
            invalid_id: -1,
            canned_xml: "XML".to_string(),
            record_count: 10,
        }
    }
}

impl ContractConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            route_prefix: env::var("CRUD_CONTRACT_ROUTE_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or(defaults.route_prefix),
            record_id: parse_var("CRUD_CONTRACT_RECORD_ID", defaults.record_id),
            invalid_id: parse_var("CRUD_CONTRACT_INVALID_ID", defaults.invalid_id),
            canned_xml: env::var("CRUD_CONTRACT_CANNED_XML").unwrap_or(defaults.canned_xml),
            record_count: parse_var("CRUD_CONTRACT_RECORD_COUNT", defaults.record_count),
        }
    }

    /// Use a different route prefix
    pub fn with_route_prefix(mut self, prefix: &str) -> Self {
        self.route_prefix = normalize_prefix(prefix);
        self
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{} has invalid value {:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// Leading slash, no trailing slash; "/" and "" mean no prefix
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
