use alloc::collections::VecDeque;

use log::{debug, trace};
use spin::Mutex;

use crate::arch::ArchHooks;
use crate::common::arena::Arena;
use crate::config::{IDLE_HALT_BATCH, IDLE_THREAD_PRIORITY, PRIORITY_LEVELS};

use super::context::ThreadContext;
use super::process::{Process, ProcessHandle};
use super::thread::{Priority, Thread, ThreadHandle, ThreadMain};

/// The installed scheduler instance, taken by the interrupt entry points.
/// [`super::init`] fills it exactly once.
pub static PROCESS_MANAGER: Mutex<Option<ProcessManager>> = Mutex::new(None);

/// Per-priority queues of runnable threads.
///
/// Slot index == priority; selection scans from the highest index down.
/// Threads are only ever appended — there is no blocked state and no
/// teardown in this kernel, so every thread sits in exactly one queue slot
/// for its whole life and positions within a level never shift.
pub struct ReadyQueues {
    levels: [VecDeque<ThreadHandle>; PRIORITY_LEVELS],
}

impl ReadyQueues {
    fn new() -> Self {
        const EMPTY: VecDeque<ThreadHandle> = VecDeque::new();
        Self {
            levels: [EMPTY; PRIORITY_LEVELS],
        }
    }

    /// Append a thread at the tail of its priority level.
    pub(crate) fn enqueue(&mut self, priority: Priority, handle: ThreadHandle) {
        assert!(
            priority < PRIORITY_LEVELS,
            "ReadyQueues::enqueue: priority {} out of range",
            priority
        );
        self.levels[priority].push_back(handle);
    }
}

/// Position of the running thread inside its ready queue.
///
/// The running thread stays in place in its level — round robin only needs
/// to find the entry after it. The slot stays valid because levels are
/// append-only.
#[derive(Clone, Copy, Debug)]
struct RunningThread {
    handle: ThreadHandle,
    priority: Priority,
    slot: usize,
}

/// Single authority over process/thread creation, ready-queue membership and
/// next-thread selection.
pub struct ProcessManager {
    arch: &'static dyn ArchHooks,
    processes: Arena<Process>,
    threads: Arena<Thread>,
    ready: ReadyQueues,
    running: Option<RunningThread>,
    idle_process: Option<ProcessHandle>,
}

impl ProcessManager {
    pub fn new(arch: &'static dyn ArchHooks) -> Self {
        Self {
            arch,
            processes: Arena::new("Process"),
            threads: Arena::new("Thread"),
            ready: ReadyQueues::new(),
            running: None,
            idle_process: None,
        }
    }

    /// Create a process with one main thread at `main_thread_priority`
    /// running `entry`. The main thread is ready as soon as this returns.
    pub fn create_process(
        &mut self,
        name: &str,
        main_thread_priority: Priority,
        entry: ThreadMain,
    ) -> ProcessHandle {
        let handle = self.processes.insert(Process::new(name));
        let process = self.processes.get_mut(handle);
        process.add_thread(
            &mut self.threads,
            &mut self.ready,
            self.arch,
            entry,
            main_thread_priority,
            0,
        );
        debug!("process: created {:?} ({})", handle, name);
        handle
    }

    /// Add a thread to an existing process; it becomes ready immediately.
    pub fn add_thread(
        &mut self,
        process: ProcessHandle,
        entry: ThreadMain,
        priority: Priority,
        parameter: usize,
    ) -> ThreadHandle {
        let process = self.processes.get_mut(process);
        process.add_thread(
            &mut self.threads,
            &mut self.ready,
            self.arch,
            entry,
            priority,
            parameter,
        )
    }

    /// Insert the referenced thread at the tail of its priority's queue.
    ///
    /// No duplicate check: enqueueing a thread that is already queued makes
    /// it occupy two round-robin slots. Callers own that invariant.
    pub fn add_ready_thread(&mut self, handle: ThreadHandle) {
        let priority = self.threads.get(handle).priority();
        self.ready.enqueue(priority, handle);
    }

    /// One-time bootstrap: create the idle process and arm the scheduling
    /// timer. The caller yields the processor afterwards (see
    /// [`super::start`]); from the first timer interrupt on, selection is
    /// total because the idle thread is always ready.
    pub fn start_scheduler(&mut self) {
        assert!(
            self.idle_process.is_none(),
            "ProcessManager::start_scheduler: scheduler already started"
        );
        let idle = self.create_process("System Idle", IDLE_THREAD_PRIORITY, idle_thread_main);
        self.idle_process = Some(idle);
        self.arch.setup_scheduler_timer();
    }

    /// Pick the thread to run next.
    ///
    /// Round robin first: if the running thread has a successor entry in its
    /// own priority level, that successor wins. Only when the running thread
    /// is the last entry at its level (or nothing runs yet) are the levels
    /// rescanned from the top. A freshly readied higher-priority thread
    /// therefore takes over one switch after the running thread reaches the
    /// end of its level, not immediately.
    fn select_next_thread(&self) -> RunningThread {
        if let Some(current) = self.running {
            let level = &self.ready.levels[current.priority];
            if let Some(&next) = level.get(current.slot + 1) {
                return RunningThread {
                    handle: next,
                    priority: current.priority,
                    slot: current.slot + 1,
                };
            }
        }

        for priority in (0..PRIORITY_LEVELS).rev() {
            if let Some(&head) = self.ready.levels[priority].front() {
                return RunningThread {
                    handle: head,
                    priority,
                    slot: 0,
                };
            }
        }

        panic!("ProcessManager::select_next_thread: no runnable thread");
    }

    /// Interrupt-driven entry: advance the running reference and hand back
    /// the saved context the interrupt return path must restore.
    ///
    /// This is the only place where the running reference changes.
    pub fn switch_thread_context(&mut self) -> &mut ThreadContext {
        let next = self.select_next_thread();
        trace!(
            "scheduler: switch to {:?} (priority {})",
            next.handle,
            next.priority
        );
        self.running = Some(next);
        self.threads.get_mut(next.handle).context_mut()
    }

    pub fn process(&self, handle: ProcessHandle) -> &Process {
        self.processes.get(handle)
    }

    pub fn process_mut(&mut self, handle: ProcessHandle) -> &mut Process {
        self.processes.get_mut(handle)
    }

    pub fn thread(&self, handle: ThreadHandle) -> &Thread {
        self.threads.get(handle)
    }

    pub fn running_thread(&self) -> Option<ThreadHandle> {
        self.running.map(|running| running.handle)
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    pub fn idle_process(&self) -> Option<ProcessHandle> {
        self.idle_process
    }

    pub fn arch(&self) -> &'static dyn ArchHooks {
        self.arch
    }
}

/// Body of the idle thread: halt until interrupted, forever, with a
/// heartbeat every [`IDLE_HALT_BATCH`] halts. Runs at the lowest priority so
/// selection always has a candidate.
///
/// Thread entries are plain `fn(usize)` and cannot capture, so the arch
/// hooks are read from the installed manager.
fn idle_thread_main(_parameter: usize) {
    let arch = PROCESS_MANAGER
        .lock()
        .as_ref()
        .expect("idle_thread_main: no process manager installed")
        .arch();
    loop {
        for _ in 0..IDLE_HALT_BATCH {
            arch.halt_processor();
        }
        trace!("idle: heartbeat");
    }
}
