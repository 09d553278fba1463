//! Camera manager: owns the camera list and the event dispatcher.

use std::collections::HashSet;
use std::sync::Arc;

use super::device::{DeviceEnumerator, SysfsEnumerator};
use super::types::{Camera, DeviceInfo, ManagerError};
#[cfg(target_os = "linux")]
use super::node::V4lEnumerator;
use crate::config::{Backend, ManagerConfig};
use crate::event_loop::EventDispatcher;

/// Enumerates cameras and hands out shared handles to them.
///
/// The camera list is only populated between [`start`](Self::start) and
/// [`stop`](Self::stop).
pub struct CameraManager {
    enumerator: Box<dyn DeviceEnumerator>,
    cameras: Vec<Arc<Camera>>,
    dispatcher: EventDispatcher,
    running: bool,
}

impl CameraManager {
    pub fn new(enumerator: Box<dyn DeviceEnumerator>) -> Self {
        Self {
            enumerator,
            cameras: Vec::new(),
            dispatcher: EventDispatcher::new(),
            running: false,
        }
    }

    /// Manager using the configured discovery backend.
    pub fn from_config(config: &ManagerConfig) -> Self {
        let sysfs = || SysfsEnumerator::new(&config.sysfs_root, &config.dev_root);
        match config.backend {
            #[cfg(target_os = "linux")]
            Backend::V4l => Self::new(Box::new(V4lEnumerator::new())),
            #[cfg(not(target_os = "linux"))]
            Backend::V4l => {
                log::warn!("v4l backend is only available on Linux, walking sysfs instead");
                Self::new(Box::new(sysfs()))
            }
            Backend::Sysfs => Self::new(Box::new(sysfs())),
        }
    }

    /// Enumerate devices and populate the camera list.
    pub fn start(&mut self) -> Result<(), ManagerError> {
        if self.running {
            return Err(ManagerError::Busy);
        }

        let devices = self.enumerator.enumerate()?;
        self.cameras = build_cameras(devices);
        self.running = true;

        log::info!("Camera manager started with {} camera(s)", self.cameras.len());
        Ok(())
    }

    /// Release every camera. Safe to call more than once.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.cameras.clear();
        self.running = false;
        log::info!("Camera manager stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// All known cameras, ordered by device node number.
    pub fn cameras(&self) -> &[Arc<Camera>] {
        &self.cameras
    }

    /// Look up a camera by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<Camera>> {
        self.cameras.iter().find(|c| c.name() == name).cloned()
    }

    pub fn event_dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Turn devices into cameras with unique names.
///
/// When a model is already taken, the node name is appended, and then a
/// counter until the name is free.
fn build_cameras(devices: Vec<DeviceInfo>) -> Vec<Arc<Camera>> {
    let mut taken = HashSet::new();
    devices
        .into_iter()
        .map(|device| {
            let name = unique_name(&mut taken, &device);
            Arc::new(Camera::new(name, device.model, device.node))
        })
        .collect()
}

fn unique_name(taken: &mut HashSet<String>, device: &DeviceInfo) -> String {
    let mut name = device.model.clone();
    if taken.contains(&name) {
        name = format!("{} ({})", device.model, device.node_name);
    }
    let mut counter = 2;
    while taken.contains(&name) {
        name = format!("{} ({} #{})", device.model, device.node_name, counter);
        counter += 1;
    }
    taken.insert(name.clone());
    name
}
