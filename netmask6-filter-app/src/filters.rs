//! Builds the filter nodes from the configuration and evaluates them for an event source

use log::{info, warn};
use netmask6_filter_common::{parse_cidr, FilterNetmask6, FilterNode, SourceAddress};

use crate::conf::Configuration;

/// A configured filter node and the name it was defined with
#[derive(Debug)]
pub struct NamedFilter {
    pub name: String,
    pub node: FilterNode<FilterNetmask6>,
}

/// Creates a filter node for every filter definition of the configuration
///
/// An invalid network does not abort the configuration. It is reported and the node never matches
/// (its result is the negate flag only).
///
/// # Arguments
/// * `config` - the loaded configuration
///
/// Returns the filter nodes in the order they are defined
pub fn build_filters(config: &Configuration) -> Vec<NamedFilter> {
    config
        .filters
        .iter()
        .map(|definition| {
            let expr = match parse_cidr(&definition.netmask6) {
                Ok(network) => {
                    info!(
                        "Adding filter {} for network {} (negate: {})",
                        definition.name, network, definition.negate
                    );
                    FilterNetmask6::from(network)
                }
                Err(err) => {
                    warn!(
                        "Filter {} has an invalid network {:?}: {}. It will never match",
                        definition.name, definition.netmask6, err
                    );
                    FilterNetmask6::invalid()
                }
            };
            NamedFilter {
                name: definition.name.clone(),
                node: FilterNode::new(expr, definition.negate),
            }
        })
        .collect()
}

/// Evaluates all filters for an event source
///
/// Returns the name of each filter together with its result
pub fn evaluate<'a>(
    filters: &'a [NamedFilter],
    source: &'a SourceAddress,
) -> impl Iterator<Item = (&'a str, bool)> + 'a {
    filters
        .iter()
        .map(move |filter| (filter.name.as_str(), filter.node.eval(source)))
}
