/// Saved execution context of a thread.
///
/// One of these lives inside every [`super::thread::Thread`]; the scheduler
/// hands out its address on a context switch and the interrupt return path
/// restores registers from it. The scheduler itself never interprets the
/// contents — only [`crate::arch::ArchHooks::initialize_thread_context`] and
/// the architecture's save/restore code do. The layout gives the
/// architecture a program counter, a stack pointer and a bank of
/// callee-saved register slots to fill as it sees fit.
#[repr(C)]
#[derive(Default, Clone, Debug)]
pub struct ThreadContext {
    ra: usize,               // where execution lands if the entry returns
    sp: usize,               // top of the thread's own stack
    pc: usize,               // first instruction on restore
    saved_regs: [usize; 12], // callee-saved register bank
}

/// A fresh thread's entry argument parks in a callee-saved slot until the
/// architecture's entry trampoline moves it into the argument register.
const ARG: usize = 0;

impl ThreadContext {
    pub fn set_return_address(&mut self, addr: usize) {
        self.ra = addr;
    }

    pub fn set_stack_pointer(&mut self, addr: usize) {
        self.sp = addr;
    }

    pub fn set_program_counter(&mut self, addr: usize) {
        self.pc = addr;
    }

    pub fn set_argument(&mut self, value: usize) {
        self.saved_regs[ARG] = value;
    }

    pub fn return_address(&self) -> usize {
        self.ra
    }

    pub fn stack_pointer(&self) -> usize {
        self.sp
    }

    pub fn program_counter(&self) -> usize {
        self.pc
    }

    pub fn argument(&self) -> usize {
        self.saved_regs[ARG]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_round_trip() {
        let mut ctx = ThreadContext::default();
        ctx.set_return_address(0x1000);
        ctx.set_stack_pointer(0x8000);
        ctx.set_program_counter(0x2000);
        ctx.set_argument(42);
        assert_eq!(ctx.return_address(), 0x1000);
        assert_eq!(ctx.stack_pointer(), 0x8000);
        assert_eq!(ctx.program_counter(), 0x2000);
        assert_eq!(ctx.argument(), 42);
    }
}
