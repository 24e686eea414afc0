//! Graph traversal over relational lists.
//!
//! [`EdgeList`] and [`NodeList`] are peers bound by a shared
//! [`EdgeTypeDescriptor`](crate::edge_type::EdgeTypeDescriptor). A hop never
//! executes anything: it stacks an `ID IN (projection)` predicate on a fresh
//! base list, so a chain like `nodes.to()?.to()?` stays a single deferred
//! query until it is enumerated.
//!
//! # Example
//!
//! ```rust,ignore
//! use relgraph_core::traversal::Traverse;
//!
//! let alice = graph.nodes("Person", Some("Follows"))?.filter_eq("Name", "Alice");
//! let friends_of_friends = alice.to()?.to()?;
//! for record in friends_of_friends.to_vec()? {
//!     println!("{}", record.id());
//! }
//! ```

mod edge_list;
mod node_list;

pub use crate::edge_type::Direction;
pub use edge_list::EdgeList;
pub use node_list::NodeList;

use crate::error::Result;
use crate::query::Predicate;

/// Expansion of a list into its adjacent node list.
///
/// `to` follows edges forward, `from` follows them backward. A `filter`
/// narrows the hop; where it applies for node lists is set by
/// [`FilterStage`](crate::config::FilterStage).
pub trait Traverse {
    /// Expands in `direction`, optionally narrowed by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FactoryResolution`] if a list kind for the
    /// next hop is not registered. Misconfigured edge types are not errors;
    /// they expand to an empty list.
    ///
    /// Endpoint classes and the edge table are checked when the hop is
    /// composed, not when it is enumerated. A hop built before its edge type
    /// was declared stays empty; compose it again afterwards.
    fn traverse(&self, direction: Direction, filter: Option<Predicate>) -> Result<NodeList>;

    /// Follows edges forward.
    fn to(&self) -> Result<NodeList> {
        self.traverse(Direction::To, None)
    }

    /// Follows edges backward.
    fn from(&self) -> Result<NodeList> {
        self.traverse(Direction::From, None)
    }

    /// Follows edges forward, narrowed by `filter`.
    fn to_where(&self, filter: Predicate) -> Result<NodeList> {
        self.traverse(Direction::To, Some(filter))
    }

    /// Follows edges backward, narrowed by `filter`.
    fn from_where(&self, filter: Predicate) -> Result<NodeList> {
        self.traverse(Direction::From, Some(filter))
    }
}
