//! Pools, their members and the dual member-list decoding.

use patchmerge::decode::{ItemsRef, collapse_dual};
use patchmerge::{DecodeError, Mergeable};
use serde::{Deserialize, Serialize};

use super::is_zero;

/// A load-balancing pool.
///
/// Decoding accepts members inline or under `membersReference`, but not
/// both; either way they end up in [`Pool::members`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Mergeable, Serialize, Deserialize)]
#[serde(try_from = "RawPool", rename_all = "camelCase")]
pub struct Pool {
    /// Pool name; the key inside keyed sets.
    pub name: String,
    /// Administrative partition, e.g. `Common`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub partition: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Balancing algorithm, e.g. `round-robin`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub load_balancing_mode: String,
    /// Health monitor expression.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub monitor: String,
    /// Pool members.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<PoolMember>,
    /// Server-side revision counter; never patched.
    #[merge(skip)]
    #[serde(skip_serializing)]
    pub generation: u64,
}

/// A member of a [`Pool`], named `<node>:<port>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Mergeable, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolMember {
    /// Member name; the key inside keyed sets.
    pub name: String,
    /// Resolved address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Weight for ratio balancing.
    #[serde(skip_serializing_if = "is_zero")]
    pub ratio: u32,
    /// Priority group for failover.
    #[serde(skip_serializing_if = "is_zero")]
    pub priority_group: u32,
    /// `user-enabled` or `user-disabled`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session: String,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPool {
    name: String,
    partition: String,
    description: Option<String>,
    load_balancing_mode: String,
    monitor: String,
    members: Vec<PoolMember>,
    members_reference: Option<ItemsRef<PoolMember>>,
    generation: u64,
}

impl TryFrom<RawPool> for Pool {
    type Error = DecodeError;

    fn try_from(raw: RawPool) -> Result<Self, Self::Error> {
        let members = collapse_dual(&raw.name, "members", raw.members, raw.members_reference)?;
        Ok(Self {
            name: raw.name,
            partition: raw.partition,
            description: raw.description,
            load_balancing_mode: raw.load_balancing_mode,
            monitor: raw.monitor,
            members,
            generation: raw.generation,
        })
    }
}
