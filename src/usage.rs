use crate::config::{LinearizerConfig, type_segment};
use crate::workflow::TaskNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Number of steps per external service, ordered by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceUsage(BTreeMap<String, usize>);

impl ServiceUsage {
    pub fn get(&self, service: &str) -> usize {
        self.0.get(service).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most used service; ties go to the alphabetically first name.
    pub fn most_used(&self) -> Option<(&str, usize)> {
        self.iter()
            .fold(None, |best: Option<(&str, usize)>, (name, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((name, count)),
            })
    }
}

impl FromIterator<String> for ServiceUsage {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for service in iter {
            *counts.entry(service).or_insert(0) += 1;
        }
        ServiceUsage(counts)
    }
}

/// Infers which external service a node talks to.
///
/// Generic HTTP nodes are identified by the host of their `url` parameter
/// (`www.` stripped); when the URL is missing or not a literal the service is
/// `"http"`. Every other node is identified by its type tag's last segment,
/// lower-cased, with a trailing `Trigger` removed.
pub fn infer_service(node: &TaskNode, config: &LinearizerConfig) -> Option<String> {
    if config.is_http_request(&node.node_type) {
        let host = node
            .parameters
            .get("url")
            .and_then(|v| v.as_str())
            .map(|u| u.trim_start_matches('='))
            .and_then(|u| Url::parse(u).ok())
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()));
        return Some(host.unwrap_or_else(|| "http".to_string()));
    }

    let segment = type_segment(&node.node_type);
    let service = segment.strip_suffix("Trigger").unwrap_or(segment);
    if service.is_empty() {
        None
    } else {
        Some(service.to_lowercase())
    }
}
