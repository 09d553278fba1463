//! Device enumeration through the `v4l` crate.

use std::io;
use std::path::Path;

use v4l::capability::Flags;
use v4l::context;
use v4l::Device;

use super::device::DeviceEnumerator;
use super::types::DeviceInfo;

/// Enumerates the system's video4linux nodes.
///
/// Only nodes that can capture video are reported; metadata and output
/// nodes of the same hardware are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct V4lEnumerator;

impl V4lEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceEnumerator for V4lEnumerator {
    fn enumerate(&self) -> io::Result<Vec<DeviceInfo>> {
        let mut devices: Vec<DeviceInfo> = context::enum_devices()
            .into_iter()
            .filter_map(|node| {
                let index = node.index();
                let node_name = format!("video{}", index);

                let card = match query_capture_caps(node.path()) {
                    Ok(Some(card)) => card,
                    Ok(None) => {
                        log::debug!("Skipping {}: not a capture node", node_name);
                        return None;
                    }
                    Err(e) => {
                        log::warn!("Skipping {}: {}", node_name, e);
                        return None;
                    }
                };

                let model = node
                    .name()
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(card);
                if model.is_empty() {
                    log::warn!("Skipping {}: no device name", node_name);
                    return None;
                }

                Some(DeviceInfo {
                    node_name,
                    number: index as u32,
                    model,
                    node: node.path().to_path_buf(),
                })
            })
            .collect();

        devices.sort_by_key(|d| d.number);
        Ok(devices)
    }
}

/// Open the node and return its card name if it is a video capture node.
fn query_capture_caps(path: &Path) -> io::Result<Option<String>> {
    let caps = Device::with_path(path)?.query_caps()?;
    if caps.capabilities.contains(Flags::VIDEO_CAPTURE) {
        Ok(Some(caps.card.trim().to_string()))
    } else {
        Ok(None)
    }
}
