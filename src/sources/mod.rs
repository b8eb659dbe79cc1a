// Sources module for remote registry lookups

pub mod http;
pub mod modrinth;
pub mod source_trait;

pub use modrinth::ModrinthClient;
pub use source_trait::{RemoteArtifact, RemoteLookup};

use crate::config::LookupConfig;
use log::warn;

/// Build the lookup client for `config`, or `None` when lookups are disabled
/// or the client cannot be created
pub fn lookup_from_config(config: &LookupConfig) -> Option<Box<dyn RemoteLookup>> {
    if !config.enabled {
        return None;
    }

    match ModrinthClient::new(config.clone()) {
        Ok(client) => Some(Box::new(client)),
        Err(e) => {
            warn!("Online lookups unavailable: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_has_no_lookup() {
        assert!(lookup_from_config(&LookupConfig::default().offline()).is_none());
    }

    #[test]
    fn test_enabled_config_builds_modrinth() {
        let lookup = lookup_from_config(&LookupConfig::default()).unwrap();
        assert_eq!(lookup.name(), "modrinth");
    }
}
