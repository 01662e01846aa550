use alloc::string::String;
use alloc::vec::Vec;

use crate::arch::ArchHooks;
use crate::common::arena::{Arena, Handle};

use super::manager::ReadyQueues;
use super::thread::{Priority, Thread, ThreadHandle, ThreadMain};

pub type ProcessHandle = Handle<Process>;

/// A named grouping of threads.
///
/// No isolation semantics live here; the process is a unit of ownership and
/// bookkeeping. Every process holds at least one thread from the moment
/// [`super::manager::ProcessManager::create_process`] returns.
pub struct Process {
    name: String,
    threads: Vec<ThreadHandle>,
}

impl Process {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            threads: Vec::new(),
        }
    }

    /// Create a thread owned by this process and publish it as ready.
    ///
    /// The scheduler's thread arena and ready queues are passed in
    /// explicitly; a process keeps no reference back to its scheduler.
    pub fn add_thread(
        &mut self,
        threads: &mut Arena<Thread>,
        ready: &mut ReadyQueues,
        arch: &dyn ArchHooks,
        entry: ThreadMain,
        priority: Priority,
        parameter: usize,
    ) -> ThreadHandle {
        let handle = threads.insert(Thread::new(arch, entry, priority, parameter));
        self.threads.push(handle);
        ready.enqueue(priority, handle);
        handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handles of the owned threads, in creation order.
    pub fn threads(&self) -> &[ThreadHandle] {
        &self.threads
    }
}
