//! Parsers for `kubectl ... -o json` output.
//!
//! These are pure functions over `serde_json::Value` so the derived access
//! URLs and the pod-health table can be unit tested without a cluster.

use serde_json::Value;

/// Externally reachable endpoints derived from live cluster state.
/// Anything the cluster has not assigned yet is simply `None`.
#[derive(Debug, Default)]
pub struct AccessUrls {
    pub load_balancer: Option<String>,
    pub node_port: Option<String>,
    pub ingress: Option<String>,
}

impl AccessUrls {
    pub fn is_empty(&self) -> bool {
        self.load_balancer.is_none() && self.node_port.is_none() && self.ingress.is_none()
    }
}

/// Load-balancer endpoint of a service, preferring the ingress IP over the
/// hostname (cloud providers assign one or the other).
pub fn load_balancer_endpoint(service: &Value, port: u16) -> Option<String> {
    let ingress = service
        .pointer("/status/loadBalancer/ingress/0")?;

    let addr = ingress
        .get("ip")
        .or_else(|| ingress.get("hostname"))?
        .as_str()?;

    Some(format!("http://{}:{}", addr, port))
}

/// First node port exposed by a service, if any.
pub fn node_port(service: &Value) -> Option<u16> {
    service
        .pointer("/spec/ports")?
        .as_array()?
        .iter()
        .find_map(|p| p.get("nodePort"))
        .and_then(Value::as_u64)
        .map(|p| p as u16)
}

/// Address of the first node from a node list, preferring ExternalIP.
pub fn node_address(nodes: &Value) -> Option<String> {
    let addresses = nodes
        .pointer("/items/0/status/addresses")?
        .as_array()?;

    let by_type = |wanted: &str| {
        addresses.iter().find_map(|a| {
            (a.get("type")?.as_str()? == wanted)
                .then(|| a.get("address")?.as_str().map(String::from))
                .flatten()
        })
    };

    by_type("ExternalIP").or_else(|| by_type("InternalIP"))
}

/// Address assigned to the first ingress resource, if any.
pub fn ingress_endpoint(ingresses: &Value) -> Option<String> {
    let ingress = ingresses.pointer("/items/0/status/loadBalancer/ingress/0")?;

    let addr = ingress
        .get("ip")
        .or_else(|| ingress.get("hostname"))?
        .as_str()?;

    Some(format!("http://{}", addr))
}

/// One row of the derived pod-health table.
#[derive(Debug)]
pub struct PodHealth {
    pub name: String,
    pub phase: String,
    pub ready: usize,
    pub total: usize,
    pub restarts: u64,
}

impl PodHealth {
    pub fn is_healthy(&self) -> bool {
        self.phase == "Running" && self.total > 0 && self.ready == self.total
    }
}

/// Derive the pod-health table from a `kubectl get pods -o json` listing.
pub fn pod_health(pods: &Value) -> Vec<PodHealth> {
    let Some(items) = pods.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|pod| {
            let name = pod
                .pointer("/metadata/name")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string();
            let phase = pod
                .pointer("/status/phase")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();

            let statuses = pod
                .pointer("/status/containerStatuses")
                .and_then(Value::as_array);

            let (ready, total, restarts) = statuses
                .map(|cs| {
                    let ready = cs
                        .iter()
                        .filter(|c| c.get("ready").and_then(Value::as_bool) == Some(true))
                        .count();
                    let restarts = cs
                        .iter()
                        .filter_map(|c| c.get("restartCount").and_then(Value::as_u64))
                        .sum();
                    (ready, cs.len(), restarts)
                })
                .unwrap_or((0, 0, 0));

            PodHealth {
                name,
                phase,
                ready,
                total,
                restarts,
            }
        })
        .collect()
}
