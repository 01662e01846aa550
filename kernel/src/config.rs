//! Compile-time scheduler parameters.

use crate::process::thread::Priority;

/// Highest priority a thread may be created with.
/// Priorities run `0..=MAX_THREAD_PRIORITY`; a higher value wins.
pub const MAX_THREAD_PRIORITY: Priority = 15;

/// Number of ready-queue levels, one per priority.
pub const PRIORITY_LEVELS: usize = MAX_THREAD_PRIORITY + 1;

/// Stack size handed to every thread at creation.
pub const DEFAULT_THREAD_STACK_SIZE: usize = 16 * 1024;

/// Priority of the idle thread created by scheduler bootstrap.
/// Must be the lowest level so any other runnable thread beats it.
pub const IDLE_THREAD_PRIORITY: Priority = 0;

/// Processor halts the idle thread performs between heartbeats.
pub const IDLE_HALT_BATCH: usize = 100;
