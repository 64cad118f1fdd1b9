// Per-thread state and CPU time

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadState {
    New,
    Runnable,
    Blocked,
    Waiting,
    TimedWaiting,
    Terminated,
}

impl ThreadState {
    /// Map the state letter from `/proc/<pid>/task/<tid>/stat`.
    pub fn from_proc_letter(letter: char) -> Self {
        match letter {
            'R' | 'W' => ThreadState::Runnable,
            'D' => ThreadState::Blocked,
            'Z' | 'X' | 'x' => ThreadState::Terminated,
            _ => ThreadState::Waiting,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreadState::New => "NEW",
            ThreadState::Runnable => "RUNNABLE",
            ThreadState::Blocked => "BLOCKED",
            ThreadState::Waiting => "WAITING",
            ThreadState::TimedWaiting => "TIMED_WAITING",
            ThreadState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDetail {
    pub tid: u64,
    pub name: String,
    pub state: ThreadState,
    /// Cumulative CPU time in nanoseconds.
    pub cpu_time_ns: u64,
}
