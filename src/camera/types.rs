//! Camera types and data structures.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A camera known to the [`CameraManager`](super::CameraManager).
///
/// Handles are shared as `Arc<Camera>` and never change after the manager
/// creates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    name: String,
    model: String,
    node: PathBuf,
}

impl Camera {
    pub(crate) fn new(name: String, model: String, node: PathBuf) -> Self {
        Self { name, model, node }
    }

    /// Unique name used to select the camera.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model string reported by the driver.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Device node, e.g. `/dev/video0`.
    pub fn node(&self) -> &Path {
        &self.node
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.node.display())
    }
}

/// A video device discovered by a [`DeviceEnumerator`](super::DeviceEnumerator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Kernel node name, e.g. `video0`
    pub node_name: String,
    /// Number parsed from the node name, used for ordering
    pub number: u32,
    /// Model string reported by the driver
    pub model: String,
    /// Path of the device node
    pub node: PathBuf,
}

/// Errors that can occur when starting the camera manager.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// `start()` called on a manager that is already running
    #[error("Device or resource busy")]
    Busy,
    /// Device enumeration failed
    #[error("{0}")]
    Enumeration(#[from] io::Error),
}
