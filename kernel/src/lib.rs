//! Scheduler core of the Vesper kernel.
//!
//! Creates processes and threads, tracks which threads are runnable in
//! per-priority ready queues, and decides on every scheduling event which
//! thread's saved context the processor restores next. Everything that
//! touches real hardware (the preemption timer, the halt instruction, the
//! layout of a saved register set) sits behind [`arch::ArchHooks`] and is
//! supplied by the embedding kernel, which also owns the panic handler and
//! the heap. Tests run hosted against a recording implementation of the
//! hooks.
#![cfg_attr(not(test), no_std)]

#[macro_use] // allows macros like `vec`
extern crate alloc;

pub mod arch;
pub mod common;
pub mod config;
pub mod process;
