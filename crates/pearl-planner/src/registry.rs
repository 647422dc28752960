//! In-memory channel registry.

use crate::collaborators::{ChannelDeclaration, ChannelRegistry};
use crate::error::{PlanError, Result};
use pearl_report::ChannelListing;
use tracing::{debug, info};

/// Channel registry kept in memory, append-only.
///
/// Pass the same registry to several [`plan`](crate::DependencyPlanner::plan)
/// calls to accumulate channels across them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChannelRegistry {
    channels: Vec<ChannelDeclaration>,
}

impl InMemoryChannelRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registry from `pear list-channels` rows.
    #[must_use]
    pub fn from_listings(listings: &[ChannelListing]) -> Self {
        let channels = listings
            .iter()
            .map(|listing| ChannelDeclaration {
                name: listing.name.clone(),
                alias: listing.alias.clone(),
                summary: listing.summary.clone(),
            })
            .collect::<Vec<_>>();
        debug!(channels = channels.len(), "channel registry seeded");
        Self { channels }
    }

    /// Known channels in registration order.
    #[must_use]
    pub fn channels(&self) -> &[ChannelDeclaration] {
        &self.channels
    }

    /// Number of known channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelRegistry for InMemoryChannelRegistry {
    fn register(&mut self, channel: &ChannelDeclaration) -> Result<bool> {
        if channel.name.is_empty() || channel.name.contains(char::is_whitespace) {
            return Err(PlanError::ChannelRegistration {
                channel: channel.name.clone(),
                reason: "not a valid channel name".to_string(),
            });
        }
        if self.is_known(&channel.name) {
            debug!(channel = %channel.name, "channel already known");
            return Ok(false);
        }
        info!(channel = %channel.name, "channel registered");
        self.channels.push(channel.clone());
        Ok(true)
    }

    fn is_known(&self, name: &str) -> bool {
        self.channels
            .iter()
            .any(|c| c.name == name || c.alias.as_deref() == Some(name))
    }
}
