//! Process and thread scheduling.
//!
//! The scheduler core: [`manager::ProcessManager`] owns every process and
//! thread (in arenas, addressed by handles), the per-priority ready queues
//! and the running reference. This module adds the global install path the
//! interrupt plumbing uses: [`init`] installs a manager, [`start`] boots
//! scheduling and yields the processor, and the timer interrupt calls
//! [`kernel_switch_thread_context`] to publish the next context to restore.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::arch::ArchHooks;

use self::manager::{ProcessManager, PROCESS_MANAGER};

pub mod context;
pub mod manager;
pub mod process;
pub mod thread;

/// Address of the saved context the interrupt return path restores next.
///
/// Written by [`kernel_switch_thread_context`] on every scheduling event and
/// consumed by the architecture's interrupt-return code.
#[no_mangle]
pub static CURRENT_THREAD_CONTEXT: AtomicUsize = AtomicUsize::new(0);

/// Install the scheduler. Must be called exactly once, before [`start`].
pub fn init(arch: &'static dyn ArchHooks) {
    let mut manager = PROCESS_MANAGER.lock();
    assert!(
        manager.is_none(),
        "process::init: process manager already installed"
    );
    *manager = Some(ProcessManager::new(arch));
}

/// Bootstrap scheduling and yield the processor.
///
/// Creates the idle process, arms the scheduling timer and halts. The first
/// timer interrupt switches away from this context; under normal operation
/// it is never resumed.
pub fn start() {
    let arch = {
        let mut manager = PROCESS_MANAGER.lock();
        let manager = manager
            .as_mut()
            .expect("process::start: process manager not installed");
        manager.start_scheduler();
        manager.arch()
    };
    // halt outside the lock: the timer interrupt this waits for takes the
    // manager lock itself
    arch.halt_processor();
}

/// Timer-interrupt entry point: pick the next thread and publish the address
/// of its saved context for the interrupt return path.
#[no_mangle]
pub extern "C" fn kernel_switch_thread_context() {
    let mut manager = PROCESS_MANAGER.lock();
    let manager = manager
        .as_mut()
        .expect("kernel_switch_thread_context: process manager not installed");
    let next_context = manager.switch_thread_context();
    CURRENT_THREAD_CONTEXT.store(
        next_context as *mut context::ThreadContext as usize,
        Ordering::Release,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::mock::MockArch;
    use core::sync::atomic::Ordering;

    fn shell_main(_parameter: usize) {}

    /// The only test that touches the installed global manager; everything
    /// else runs against locally constructed managers so the suite stays
    /// parallel-safe.
    #[test]
    fn global_bootstrap_publishes_the_selected_context() {
        let arch = MockArch::leaked();
        init(arch);

        let shell = PROCESS_MANAGER
            .lock()
            .as_mut()
            .unwrap()
            .create_process("shell", 4, shell_main);

        start();
        assert_eq!(arch.timer_setups.load(Ordering::Relaxed), 1);
        assert_eq!(arch.halts.load(Ordering::Relaxed), 1);

        kernel_switch_thread_context();

        let manager = PROCESS_MANAGER.lock();
        let manager = manager.as_ref().unwrap();
        let shell_thread = manager.process(shell).threads()[0];
        assert_eq!(manager.running_thread(), Some(shell_thread));
        assert_eq!(
            CURRENT_THREAD_CONTEXT.load(Ordering::Acquire),
            manager.thread(shell_thread).context() as *const context::ThreadContext as usize
        );
    }
}
