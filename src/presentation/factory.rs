//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::DeployUseCase;
use crate::config::DeployConfig;
use crate::infrastructure::{RemoteFs, SshSession};

/// Deploy use case running over one SSH session
pub type RemoteDeployUseCase = DeployUseCase<RemoteFs, SshSession>;

/// Open a session to the configured host and build the deploy use case
///
/// The returned session is the one the use case runs on; close it when the
/// deploy is over to shut down the multiplexed connection.
pub fn create_remote_deploy_use_case(
    config: &DeployConfig,
) -> std::io::Result<(RemoteDeployUseCase, SshSession)> {
    let session = SshSession::new(config.ssh_destination(), &config.settings.ssh)?;
    let use_case = DeployUseCase::new(RemoteFs::new(session.clone()), session.clone());
    Ok((use_case, session))
}
