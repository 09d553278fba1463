//! Camera discovery.
//!
//! - Device enumeration via [`DeviceEnumerator`]: `V4lEnumerator` for the
//!   system's devices, [`SysfsEnumerator`] for a given class directory
//! - Camera list and lookup via [`CameraManager`]

mod device;
mod manager;
#[cfg(target_os = "linux")]
mod node;
mod types;

pub use device::{DeviceEnumerator, SysfsEnumerator, DEFAULT_DEV_ROOT, DEFAULT_SYSFS_ROOT};
pub use manager::CameraManager;
#[cfg(target_os = "linux")]
pub use node::V4lEnumerator;
pub use types::{Camera, DeviceInfo, ManagerError};
