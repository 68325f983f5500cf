//! Starting a downloaded installer.

use crate::error::{Result, UpdateError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Argument that tells the installer not to reboot the machine on its own.
pub const NO_RESTART_FLAG: &str = "/NORESTART";

/// Starts an installer without waiting for it.
pub trait Launcher {
    /// # Errors
    ///
    /// Returns [`UpdateError::Launch`] if the process cannot be spawned.
    fn launch(&self, installer: &Path) -> Result<()>;
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn launch(&self, installer: &Path) -> Result<()> {
        (**self).launch(installer)
    }
}

/// Spawns the installer as a separate process with [`NO_RESTART_FLAG`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, installer: &Path) -> Result<()> {
        let mut command = Command::new(installer);
        command
            .arg(NO_RESTART_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        let child = command
            .spawn()
            .map_err(|source| UpdateError::Launch {
                path: installer.to_owned(),
                source,
            })?;

        // Not waited on: the installer outlives this process.
        tracing::info!(pid = child.id(), "installer {} started", installer.display());
        Ok(())
    }
}
