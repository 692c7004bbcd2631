//! Backend nodes and their FQDN resolution settings.

use patchmerge::Mergeable;
use serde::{Deserialize, Serialize};

use super::{Interval, is_zero};

/// A backend node, addressed either directly or through an FQDN.
#[derive(Clone, Debug, Default, PartialEq, Eq, Mergeable, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Node {
    /// Node name; the key inside keyed sets.
    pub name: String,
    /// Administrative partition, e.g. `Common`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub partition: String,
    /// Static address, unused when `fqdn` is set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Name-resolution settings for FQDN nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<NodeFqdn>,
    /// Health monitor expression.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub monitor: String,
}

/// Name-resolution settings of an FQDN node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Mergeable, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeFqdn {
    /// Host name to resolve.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tm_name: String,
    /// `ipv4` or `ipv6`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address_family: String,
    /// `enabled` to create ephemeral nodes per resolved address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub autopopulate: String,
    /// Re-resolution period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    /// Seconds to wait before marking an unresolvable node down.
    #[serde(skip_serializing_if = "is_zero")]
    pub down_interval: u32,
}
