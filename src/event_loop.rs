//! Event dispatcher and the loop that runs it.
//!
//! The dispatcher blocks until something is posted to it, then handles every
//! pending event on the calling thread. Other threads (the signal handler in
//! particular) post through an [`EventNotifier`].

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

type Call = Box<dyn FnOnce() + Send>;

enum Event {
    /// Run a closure on the dispatcher thread.
    Call(Call),
    /// Only wake the dispatcher up.
    Wake,
}

/// Blocking event dispatcher owned by the camera manager.
pub struct EventDispatcher {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Handle that can post to this dispatcher from any thread.
    pub fn notifier(&self) -> EventNotifier {
        EventNotifier {
            sender: self.sender.clone(),
        }
    }

    /// Wait for at least one event, then handle all pending events.
    ///
    /// Returns the number of events handled.
    pub fn process_events(&self) -> usize {
        // The dispatcher keeps its own sender alive, so recv() cannot fail.
        let Ok(first) = self.receiver.recv() else {
            return 0;
        };
        let mut handled = 1;
        dispatch(first);

        while let Ok(event) = self.receiver.try_recv() {
            dispatch(event);
            handled += 1;
        }

        log::trace!("Processed {} event(s)", handled);
        handled
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch(event: Event) {
    match event {
        Event::Call(call) => call(),
        Event::Wake => {}
    }
}

/// Cloneable, thread-safe handle posting to an [`EventDispatcher`].
#[derive(Clone)]
pub struct EventNotifier {
    sender: Sender<Event>,
}

impl EventNotifier {
    /// Run `call` on the dispatcher thread during its next `process_events()`.
    ///
    /// Returns false if the dispatcher no longer exists.
    pub fn invoke<F>(&self, call: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.send(Event::Call(Box::new(call))).is_ok()
    }

    /// Wake the dispatcher without posting any work.
    pub fn interrupt(&self) -> bool {
        self.sender.send(Event::Wake).is_ok()
    }
}

#[derive(Default)]
struct ExitState {
    requested: AtomicBool,
    code: AtomicI32,
}

/// Runs an [`EventDispatcher`] until asked to exit.
pub struct EventLoop<'a> {
    dispatcher: &'a EventDispatcher,
    state: Arc<ExitState>,
}

impl<'a> EventLoop<'a> {
    pub fn new(dispatcher: &'a EventDispatcher) -> Self {
        Self {
            dispatcher,
            state: Arc::new(ExitState::default()),
        }
    }

    /// Handle used to stop the loop, possibly from another thread.
    pub fn exit_handle(&self) -> ExitHandle {
        ExitHandle {
            notifier: self.dispatcher.notifier(),
            state: Arc::clone(&self.state),
        }
    }

    /// Process events until exit is requested, then return the exit code.
    ///
    /// The exit request is consumed, so the loop can be run again.
    pub fn exec(&self) -> i32 {
        log::debug!("Entering event loop");
        while !self.state.requested.load(Ordering::SeqCst) {
            self.dispatcher.process_events();
        }
        self.state.requested.store(false, Ordering::SeqCst);

        let code = self.state.code.load(Ordering::SeqCst);
        log::debug!("Event loop exited with code {}", code);
        code
    }
}

/// Requests an [`EventLoop`] to exit.
#[derive(Clone)]
pub struct ExitHandle {
    notifier: EventNotifier,
    state: Arc<ExitState>,
}

impl ExitHandle {
    /// Make the loop return `code` from `exec()`.
    ///
    /// The request is applied on the dispatcher thread, so it takes effect
    /// after the events already queued ahead of it.
    pub fn exit(&self, code: i32) {
        let state = Arc::clone(&self.state);
        let posted = self.notifier.invoke(move || {
            state.code.store(code, Ordering::SeqCst);
            state.requested.store(true, Ordering::SeqCst);
        });
        if !posted {
            log::warn!("Exit requested after the event dispatcher was dropped");
        }
    }
}
