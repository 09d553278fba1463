//! Program flow: start the manager, answer the queries, run until stopped.

use std::io::{self, Write};

use crate::camera::CameraManager;
use crate::cli::Options;
use crate::event_loop::{EventLoop, ExitHandle};

/// Exit status for fatal errors.
pub const EXIT_FAILURE: i32 = 1;

/// Run the program with already parsed options.
///
/// `on_ready` receives the event loop's exit handle before any query output
/// is written; the binary installs the SIGINT handler there. Returns the
/// process exit status.
pub fn run<W, F>(options: &Options, manager: &mut CameraManager, out: &mut W, on_ready: F) -> i32
where
    W: Write,
    F: FnOnce(ExitHandle),
{
    if let Err(e) = manager.start() {
        log::error!("Camera manager failed to start: {:?}", e);
        if let Err(e) = writeln!(out, "Failed to start camera manager: {}", e) {
            log::warn!("Failed to write to stdout: {}", e);
        }
        return EXIT_FAILURE;
    }

    let code = {
        let event_loop = EventLoop::new(manager.event_dispatcher());
        on_ready(event_loop.exit_handle());

        if let Err(e) = report(options, manager, out) {
            log::warn!("Failed to write to stdout: {}", e);
        }

        event_loop.exec()
    };

    manager.stop();
    code
}

/// Print the camera list and the lookup result, as requested.
fn report<W: Write>(options: &Options, manager: &CameraManager, out: &mut W) -> io::Result<()> {
    if options.list {
        writeln!(out, "Available cameras:")?;
        for camera in manager.cameras() {
            writeln!(out, "- {}", camera.name())?;
        }
    }

    if let Some(name) = &options.camera {
        match manager.get(name) {
            Some(camera) => {
                log::debug!("Selected {}", camera);
                writeln!(out, "Using camera {}", camera.name())?;
            }
            None => writeln!(out, "Camera {} not found", name)?,
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{DeviceEnumerator, DeviceInfo};
    use std::path::PathBuf;

    struct StaticEnumerator(Vec<&'static str>);

    impl DeviceEnumerator for StaticEnumerator {
        fn enumerate(&self) -> io::Result<Vec<DeviceInfo>> {
            Ok(self
                .0
                .iter()
                .enumerate()
                .map(|(i, model)| DeviceInfo {
                    node_name: format!("video{}", i),
                    number: i as u32,
                    model: model.to_string(),
                    node: PathBuf::from(format!("/dev/video{}", i)),
                })
                .collect())
        }
    }

    struct FailingEnumerator;

    impl DeviceEnumerator for FailingEnumerator {
        fn enumerate(&self) -> io::Result<Vec<DeviceInfo>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"))
        }
    }

    fn manager(models: Vec<&'static str>) -> CameraManager {
        CameraManager::new(Box::new(StaticEnumerator(models)))
    }

    /// Run with the loop told to exit right away, returning status and stdout.
    fn run_to_exit(options: &Options, manager: &mut CameraManager) -> (i32, String) {
        let mut out = Vec::new();
        let code = run(options, manager, &mut out, |handle| handle.exit(0));
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_list_prints_every_camera() {
        let options = Options {
            list: true,
            ..Options::default()
        };
        let mut manager = manager(vec!["Integrated Camera", "USB Webcam"]);

        let (code, out) = run_to_exit(&options, &mut manager);
        assert_eq!(code, 0);
        assert_eq!(out, "Available cameras:\n- Integrated Camera\n- USB Webcam\n");
    }

    #[test]
    fn test_list_with_no_cameras() {
        let options = Options {
            list: true,
            ..Options::default()
        };
        let (code, out) = run_to_exit(&options, &mut manager(vec![]));
        assert_eq!(code, 0);
        assert_eq!(out, "Available cameras:\n");
    }

    #[test]
    fn test_camera_found() {
        let options = Options {
            camera: Some("USB Webcam".to_string()),
            ..Options::default()
        };
        let (code, out) = run_to_exit(&options, &mut manager(vec!["USB Webcam"]));
        assert_eq!(code, 0);
        assert_eq!(out, "Using camera USB Webcam\n");
    }

    #[test]
    fn test_camera_not_found_still_runs_loop() {
        let options = Options {
            camera: Some("Rear".to_string()),
            ..Options::default()
        };
        let mut on_ready_called = false;
        let mut out = Vec::new();
        let code = run(&options, &mut manager(vec!["USB Webcam"]), &mut out, |handle| {
            on_ready_called = true;
            handle.exit(0);
        });
        assert_eq!(code, 0);
        assert!(on_ready_called);
        assert_eq!(String::from_utf8(out).unwrap(), "Camera Rear not found\n");
    }

    #[test]
    fn test_list_then_select() {
        let options = Options {
            camera: Some("Integrated Camera".to_string()),
            list: true,
            help: false,
        };
        let (_, out) = run_to_exit(&options, &mut manager(vec!["Integrated Camera"]));
        assert_eq!(
            out,
            "Available cameras:\n- Integrated Camera\nUsing camera Integrated Camera\n"
        );
    }

    #[test]
    fn test_exit_code_from_loop() {
        let mut out = Vec::new();
        let code = run(&Options::default(), &mut manager(vec![]), &mut out, |handle| {
            handle.exit(3)
        });
        assert_eq!(code, 3);
        assert!(out.is_empty());
    }

    #[test]
    fn test_manager_stopped_after_run() {
        let mut manager = manager(vec!["USB Webcam"]);
        run_to_exit(&Options::default(), &mut manager);
        assert!(!manager.is_running());
        assert!(manager.cameras().is_empty());
    }

    #[test]
    fn test_start_failure() {
        let mut manager = CameraManager::new(Box::new(FailingEnumerator));
        let mut on_ready_called = false;
        let mut out = Vec::new();
        let code = run(
            &Options {
                list: true,
                ..Options::default()
            },
            &mut manager,
            &mut out,
            |_| on_ready_called = true,
        );
        assert_eq!(code, EXIT_FAILURE);
        assert!(!on_ready_called);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Failed to start camera manager: Permission denied\n"
        );
    }
}
