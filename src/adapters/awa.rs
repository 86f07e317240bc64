//! Awa LwM2M client adapter: implements [`ResourceReporter`].
//!
//! The device-management protocol is handled entirely by the `awa_clientd`
//! daemon.  This adapter launches it once and then drives it through the
//! `awa-client-*` command-line tools over the daemon's local IPC port:
//!
//! | Port call               | Tool invocation                                   |
//! |-------------------------|---------------------------------------------------|
//! | `start_session`         | `awa_clientd --port … --endPointName … &`         |
//! | `define_resource`       | `awa-client-define --ipcPort=… --objectID=… …`    |
//! | `create_instance`       | `awa-client-set -p … --create /3200/0`            |
//! | `set_boolean_resource`  | `awa-client-set -p … /3200/0/5500=True`           |
//! | `subscribe`             | `awa-client-subscribe -p … /3200/0/5500 &`        |
//!
//! Tool invocations run to completion; the daemon and subscriptions are left
//! running in the background.  Argument vectors are built by pure functions
//! so they can be checked without spawning anything.

use std::process::{Child, Command, Stdio};

use log::{debug, info};

use crate::app::ports::ResourceReporter;
use crate::app::resource::{ResourceDefinition, ResourcePath};
use crate::config::{ControllerConfig, DaemonConfig};
use crate::error::ReporterError;

/// Handle on the client daemon and its command tools.
pub struct AwaClient {
    config: DaemonConfig,
    identity: String,
    secret: String,
    daemon: Option<Child>,
    subscriptions: Vec<Child>,
}

impl AwaClient {
    pub fn new(config: DaemonConfig, controller: &ControllerConfig) -> Self {
        Self {
            config,
            identity: controller.identity().to_string(),
            secret: controller.secret().to_string(),
            daemon: None,
            subscriptions: Vec::new(),
        }
    }

    // ── Argument builders ─────────────────────────────────────

    pub fn daemon_args(&self, endpoint_name: &str) -> Vec<String> {
        vec![
            "--port".into(),
            self.config.port.to_string(),
            "--ipcPort".into(),
            self.config.ipc_port.to_string(),
            "--endPointName".into(),
            endpoint_name.to_string(),
            "--bootstrap".into(),
            self.config.bootstrap_uri.clone(),
            format!("--pskIdentity={}", self.identity),
            format!("--pskKey={}", self.secret),
        ]
    }

    pub fn define_args(&self, d: &ResourceDefinition) -> Vec<String> {
        vec![
            format!("--ipcPort={}", self.config.ipc_port),
            format!("--objectID={}", d.object_id),
            format!("--objectName={}", d.object_name),
            format!("--resourceID={}", d.resource_id),
            format!("--resourceName={}", d.resource_name),
            format!("--resourceType={}", d.resource_type),
            format!(
                "--resourceInstances={}",
                if d.multiple_instances { "multiple" } else { "single" }
            ),
            format!(
                "--resourceRequired={}",
                if d.required { "mandatory" } else { "optional" }
            ),
            format!("--resourceOperations={}", d.operations),
        ]
    }

    pub fn create_args(&self, path: &ResourcePath) -> Vec<String> {
        vec![
            "-p".into(),
            self.config.ipc_port.to_string(),
            "--create".into(),
            path.to_string(),
        ]
    }

    pub fn set_args(&self, path: &ResourcePath, value: bool) -> Vec<String> {
        let literal = if value { "True" } else { "False" };
        vec![
            "-p".into(),
            self.config.ipc_port.to_string(),
            format!("{path}={literal}"),
        ]
    }

    pub fn subscribe_args(&self, path: &ResourcePath) -> Vec<String> {
        vec!["-p".into(), self.config.ipc_port.to_string(), path.to_string()]
    }
}

impl ResourceReporter for AwaClient {
    fn start_session(&mut self, endpoint_name: &str) -> Result<(), ReporterError> {
        let args = self.daemon_args(endpoint_name);
        let child = spawn(&self.config.daemon_bin, &args)?;
        info!(
            "awa: {} started as '{}' (pid {}, ipc {})",
            self.config.daemon_bin,
            endpoint_name,
            child.id(),
            self.config.ipc_port
        );
        self.daemon = Some(child);
        Ok(())
    }

    fn define_resource(&mut self, definition: &ResourceDefinition) -> Result<(), ReporterError> {
        let args = self.define_args(definition);
        run(&self.config.define_bin, &args)
    }

    fn create_instance(&mut self, path: &ResourcePath) -> Result<(), ReporterError> {
        let args = self.create_args(path);
        run(&self.config.set_bin, &args)
    }

    fn set_boolean_resource(
        &mut self,
        path: &ResourcePath,
        value: bool,
    ) -> Result<(), ReporterError> {
        let args = self.set_args(path, value);
        run(&self.config.set_bin, &args)
    }

    fn subscribe(&mut self, path: &ResourcePath) -> Result<(), ReporterError> {
        let args = self.subscribe_args(path);
        let child = spawn(&self.config.subscribe_bin, &args)?;
        info!("awa: subscribed to {} (pid {})", path, child.id());
        self.subscriptions.push(child);
        Ok(())
    }
}

// ── Process helpers ───────────────────────────────────────────

fn spawn(program: &str, args: &[String]) -> Result<Child, ReporterError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .spawn()
        .map_err(|e| ReporterError::Spawn {
            program: program.to_string(),
            cause: e.to_string(),
        })
}

fn run(program: &str, args: &[String]) -> Result<(), ReporterError> {
    debug!("awa: {} {}", program, args.join(" "));
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| ReporterError::Spawn {
            program: program.to_string(),
            cause: e.to_string(),
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(ReporterError::CommandFailed {
            program: program.to_string(),
            code: status.code(),
        })
    }
}
