//! Architecture seam of the scheduler core.
//!
//! The core is architecture-neutral. The machine-specific pieces it relies
//! on — arming the preemption timer, halting until an interrupt, laying out
//! the initial register set of a new thread — are behind [`ArchHooks`],
//! implemented by the embedding kernel's architecture layer.

use crate::process::context::ThreadContext;
use crate::process::thread::ThreadMain;

/// Operations the scheduler needs from the architecture layer.
///
/// All of them are assumed to succeed; a hardware-level failure here is not
/// something the scheduler can recover from.
pub trait ArchHooks: Sync {
    /// Arm the periodic timer interrupt that drives preemption.
    fn setup_scheduler_timer(&self);

    /// Halt the processor until the next interrupt arrives.
    fn halt_processor(&self);

    /// Fill `context` so that restoring it enters `entry(parameter)` on the
    /// stack ending at `stack_top`, and lands on `exit_trap` should `entry`
    /// ever return.
    fn initialize_thread_context(
        &self,
        context: &mut ThreadContext,
        stack_top: usize,
        entry: ThreadMain,
        exit_trap: usize,
        parameter: usize,
    );
}
