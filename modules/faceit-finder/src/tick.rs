//! Hand-off from background lookups to the host's single-threaded tick loop.
//!
//! Workers [`post`](Dispatcher::post) closures; the host calls
//! [`TickQueue::drain`] once per tick and the closures run there, in the
//! order they were posted, with exclusive access to host state.

use tokio::sync::mpsc;
use tracing::warn;

pub type Task<H> = Box<dyn FnOnce(&mut H) + Send + 'static>;

/// Create a connected dispatcher / tick queue pair.
pub fn dispatcher<H>() -> (Dispatcher<H>, TickQueue<H>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { tx }, TickQueue { rx })
}

/// Cloneable, `Send` handle used by background work to reach the tick loop.
pub struct Dispatcher<H> {
    tx: mpsc::UnboundedSender<Task<H>>,
}

impl<H> Clone for Dispatcher<H> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<H> Dispatcher<H> {
    /// Schedule `task` for the next drained tick.
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce(&mut H) + Send + 'static,
    {
        if self.tx.send(Box::new(task)).is_err() {
            warn!("Tick queue is gone, dropping posted task");
        }
    }
}

/// Receiving end, owned by the host loop.
pub struct TickQueue<H> {
    rx: mpsc::UnboundedReceiver<Task<H>>,
}

impl<H> TickQueue<H> {
    /// Run every pending task against `host`. Returns how many ran.
    pub fn drain(&mut self, host: &mut H) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task(host);
            ran += 1;
        }
        ran
    }
}
