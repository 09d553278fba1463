//! Camera device enumeration.
//!
//! The default enumerator walks the video4linux class directory in sysfs.
//! Each `videoN` entry carries a `name` attribute with the driver-reported
//! model and an `index` attribute that is non-zero for secondary nodes
//! (UVC metadata nodes for instance) of the same hardware.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::DeviceInfo;

/// Default sysfs class directory for video devices.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/video4linux";

/// Default directory holding device nodes.
pub const DEFAULT_DEV_ROOT: &str = "/dev";

/// Source of video devices for the camera manager.
pub trait DeviceEnumerator {
    /// List the devices present right now.
    ///
    /// Returns an empty vector when there are no devices; errors are kept
    /// for conditions that prevent enumeration altogether.
    fn enumerate(&self) -> io::Result<Vec<DeviceInfo>>;
}

/// Enumerates video4linux devices from sysfs.
#[derive(Debug, Clone)]
pub struct SysfsEnumerator {
    sysfs_root: PathBuf,
    dev_root: PathBuf,
}

impl SysfsEnumerator {
    pub fn new(sysfs_root: impl Into<PathBuf>, dev_root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            dev_root: dev_root.into(),
        }
    }

    fn read_entry(&self, dir: &Path, node_name: &str, number: u32) -> Option<DeviceInfo> {
        match read_attribute(dir, "index") {
            Ok(Some(index)) if index != "0" => {
                log::debug!("Skipping {} (secondary node, index {})", node_name, index);
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read index of {}: {}", node_name, e);
                return None;
            }
        }

        let model = match read_attribute(dir, "name") {
            Ok(Some(model)) if !model.is_empty() => model,
            Ok(_) => {
                log::warn!("Skipping {}: no device name", node_name);
                return None;
            }
            Err(e) => {
                log::warn!("Skipping {}: failed to read device name: {}", node_name, e);
                return None;
            }
        };

        Some(DeviceInfo {
            node_name: node_name.to_string(),
            number,
            model,
            node: self.dev_root.join(node_name),
        })
    }
}

impl Default for SysfsEnumerator {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT, DEFAULT_DEV_ROOT)
    }
}

impl DeviceEnumerator for SysfsEnumerator {
    fn enumerate(&self) -> io::Result<Vec<DeviceInfo>> {
        let entries = match fs::read_dir(&self.sysfs_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "{} does not exist, no video devices",
                    self.sysfs_root.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut devices = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(node_name) = file_name.to_str() else {
                continue;
            };
            let Some(number) = parse_node_number(node_name) else {
                continue;
            };
            if let Some(device) = self.read_entry(&entry.path(), node_name, number) {
                log::debug!("Found {} ({})", device.model, device.node.display());
                devices.push(device);
            }
        }

        devices.sort_by_key(|d| d.number);
        Ok(devices)
    }
}

/// Parse `videoN` into `N`.
fn parse_node_number(node_name: &str) -> Option<u32> {
    let digits = node_name.strip_prefix("video")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Read a sysfs attribute, trimmed. `Ok(None)` if it does not exist.
fn read_attribute(dir: &Path, attribute: &str) -> io::Result<Option<String>> {
    match fs::read_to_string(dir.join(attribute)) {
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
