//! Built-in resource types and their registration.

pub mod app;

use std::sync::Arc;

use crate::config::SweepConfig;
use crate::registry::{RegistryError, SweeperRegistry};
use crate::sweep::handler::ResourceSweeper;
use crate::sweep::traits::ClientProvider;
use crate::sweep::types::IdentityFormat;

pub use app::{AppKind, ApplicationPage, AppsApi};

/// Register every built-in sweeper against `provider`.
///
/// Identity prefixes, dependencies and sweep settings come from `config`.
pub fn register_builtin<P>(
    registry: &mut SweeperRegistry,
    provider: Arc<P>,
    config: &SweepConfig,
) -> Result<(), RegistryError>
where
    P: ClientProvider,
    P::Client: AppsApi,
{
    let apps = AppKind::<P::Client>::new(IdentityFormat::new(config.identity_prefix(app::NAME)));
    registry.register(
        ResourceSweeper::new(apps, provider, config.sweep_settings())
            .with_dependencies(config.dependencies(app::NAME).iter().cloned()),
    )?;

    Ok(())
}
