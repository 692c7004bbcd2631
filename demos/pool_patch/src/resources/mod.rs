//! Load-balancer resources reconciled by the demo.
//!
//! Field names follow the store's camelCase JSON. Empty values are left out
//! of the serialised form so a back-filled patch only carries what it sets.

mod interval;
mod node;
mod pool;

pub use interval::Interval;
pub use node::{Node, NodeFqdn};
pub use pool::{Pool, PoolMember};

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde's skip_serializing_if passes fields by reference"
)]
const fn is_zero(value: &u32) -> bool {
    *value == 0
}
