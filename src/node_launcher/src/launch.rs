//! Launch adapter interface
//!
//! The core never spawns processes. A [`LaunchAdapter`] receives the
//! descriptor's contents and decides what to do with them.

use crate::{
    descriptor::{Namespace, NodeDescriptor},
    execution::OutputMode,
    remap::RemapPair,
    tree::ConfigMap,
};

/// Everything needed to start one node process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchRequest<'a> {
    pub namespace: &'a Namespace,
    pub node_name: &'a str,
    pub parameters: &'a ConfigMap,
    pub remappings: &'a [RemapPair],
    pub package: &'a str,
    pub executable: &'a str,
    pub output: OutputMode,
    pub emulate_tty: bool,
    pub respawn: bool,
    pub respawn_delay: f64,
    pub shutdown_on_exit: bool,
}

pub trait LaunchAdapter {
    type Error;

    fn launch(&mut self, request: LaunchRequest<'_>) -> Result<(), Self::Error>;
}

impl NodeDescriptor {
    pub fn launch_request(&self) -> LaunchRequest<'_> {
        let execution = self.execution();
        LaunchRequest {
            namespace: self.namespace(),
            node_name: self.name(),
            parameters: self.parameters(),
            remappings: self.remappings(),
            package: &execution.package,
            executable: &execution.executable,
            output: execution.output,
            emulate_tty: execution.emulate_tty,
            respawn: execution.respawn,
            respawn_delay: execution.respawn_delay,
            shutdown_on_exit: execution.shutdown_on_exit,
        }
    }

    /// Hand this descriptor to `adapter`
    pub fn launch_with<A: LaunchAdapter>(&self, adapter: &mut A) -> Result<(), A::Error> {
        log::debug!("Launching {}", self.fully_qualified_name());
        adapter.launch(self.launch_request())
    }
}
