//! SIGINT handling.

use crate::event_loop::ExitHandle;

/// Install the Ctrl+C handler that stops the event loop with status 0.
///
/// This can only succeed once per process.
pub fn install_interrupt_handler(handle: ExitHandle) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        println!("Exiting");
        handle.exit(0);
    })
}

/// Like [`install_interrupt_handler`], but a failure is only logged: the
/// event loop still runs, it just cannot be stopped with Ctrl+C.
pub fn setup_interrupt_handler(handle: ExitHandle) -> bool {
    match install_interrupt_handler(handle) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            false
        }
    }
}
