use crate::error::{Error, Result};

/// how many return addresses fit on the call stack
pub const STACK_DEPTH: usize = 16;

/// Subroutine return addresses. Lives outside addressable memory, so a
/// runaway program can't scribble over it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stack {
    sp: usize,
    frames: [u16; STACK_DEPTH],
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// the 17th push is rejected; the stack is left as it was
    pub fn push(&mut self, addr: u16) -> Result {
        if self.sp == STACK_DEPTH {
            return Err(Error::StackOverflow { addr });
        }
        self.frames[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// popping an empty stack is `Error::StackUnderflow`, never a stale frame
    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.frames[self.sp])
    }
}
