//! Fixture resolver
//!
//! Resolves unique-id selectors ending in the `fixture` segment. The fixture
//! identity is its display name; the parent parametrized method is resolved
//! through the context and its already-known fixtures are scanned for an
//! exact display-name match. Fixtures are leaves, so no expansion.

use crate::context::ResolutionContext;
use crate::descriptor::NodePayload;
use crate::resolver::Resolution;
use crate::selector::{select_unique_id, DiscoverySelector};
use std::sync::Arc;

/// Segment type of fixture nodes
pub const SEGMENT_TYPE: &str = "fixture";

/// Resolver for parametrized-method fixtures
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureResolver;

impl FixtureResolver {
    /// Create a fixture resolver
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn resolve(
        &self,
        selector: &DiscoverySelector,
        ctx: &mut ResolutionContext<'_>,
    ) -> Resolution {
        let DiscoverySelector::UniqueId(unique_id) = selector else {
            return Resolution::unresolved();
        };
        if unique_id.last_segment().segment_type() != SEGMENT_TYPE {
            return Resolution::unresolved();
        }
        let Ok(parent_id) = unique_id.remove_last() else {
            return Resolution::unresolved();
        };
        let display_name = unique_id.last_segment().value().to_string();

        let resolved = ctx.add_to_parent(&select_unique_id(parent_id), |parent| {
            let parametrized = parent.as_parametrized()?;
            let matched = parametrized
                .fixtures()
                .iter()
                .find(|fixture| fixture.display_name() == display_name)?;

            let id = parent
                .unique_id()
                .append(SEGMENT_TYPE, matched.display_name());
            Some((
                id,
                NodePayload::Fixture {
                    method: Arc::clone(parametrized.method()),
                    fixture: matched.clone(),
                },
            ))
        });

        match resolved {
            Some(node) => Resolution::matched(node),
            None => Resolution::unresolved(),
        }
    }
}
