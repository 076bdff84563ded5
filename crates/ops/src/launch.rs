//! Launch driver: start the real application with bundle-local resources

use crate::context::OpsCtx;
use reloc_errors::{Error, LaunchError};
use reloc_platform::{EnvVar, LaunchLayout};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Program, arguments and environment for starting the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: PathBuf,
    /// Full argument vector; element zero is `program`
    pub args: Vec<OsString>,
    pub env: Vec<EnvVar>,
}

/// Derive the launch plan from the launcher's own invocation.
///
/// `argv` is the launcher's full argument vector. Its first element is
/// replaced by the application path; the rest is forwarded unchanged.
///
/// # Errors
///
/// Returns `PathTooLong` if the application path or an environment value does
/// not fit the platform limit.
pub fn plan_launch<I>(ctx: &OpsCtx, argv: I) -> Result<LaunchPlan, Error>
where
    I: IntoIterator<Item = OsString>,
{
    let layout = LaunchLayout::new(ctx.layout.family());
    let program = layout
        .app_path(&ctx.paths.bundle_root, &ctx.config.launch.app)?
        .into_path_buf();
    let env = ctx
        .layout
        .environment_layout(&ctx.paths.resources_dir, &ctx.config.resources)?;

    let args: Vec<OsString> = std::iter::once(program.clone().into_os_string())
        .chain(argv.into_iter().skip(1))
        .collect();

    debug!(
        program = %program.display(),
        args = args.len(),
        env = env.len(),
        "Planned launch"
    );

    Ok(LaunchPlan { program, args, env })
}

impl LaunchPlan {
    /// Command that runs this plan, inheriting the current environment plus
    /// the plan's assignments
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.args.iter().skip(1));
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if let Some(arg0) = self.args.first() {
                command.arg0(arg0);
            }
        }
        for var in &self.env {
            command.env(var.name, &var.value);
        }
        command
    }

    /// Replace the current process with the application.
    ///
    /// Only returns if the exec failed.
    #[cfg(unix)]
    #[must_use]
    pub fn exec(self) -> LaunchError {
        use std::os::unix::process::CommandExt;

        let err = self.command().exec();
        LaunchError::ExecFailed {
            program: self.program.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Run the application to completion and exit with its status.
    ///
    /// Only returns if the application could not be started.
    #[cfg(not(unix))]
    #[must_use]
    pub fn exec(self) -> LaunchError {
        match self.command().status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(err) => LaunchError::ExecFailed {
                program: self.program.display().to_string(),
                message: err.to_string(),
            },
        }
    }
}
