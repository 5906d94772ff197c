// Host I/O harness (spec.md §6: "Host harness (consumed)").
//
// Generalized from vm.rs's `Output` trait (the teacher's own
// trait-backed I/O collaborator: `fn output(&mut self, ef: CairoOp, vm:
// &mut VM) -> Result<()>`), narrowed to the operations spec.md names.

use std::io::{self, BufRead};

pub trait Host {
    fn output(&mut self, line: &str);
    fn get_input(&mut self) -> String;
}

/// Talks to the process's real stdin/stdout.
pub struct StdHost {
    stdin: io::Stdin,
}

impl StdHost {
    pub fn new() -> StdHost {
        StdHost { stdin: io::stdin() }
    }
}

impl Default for StdHost {
    fn default() -> StdHost {
        StdHost::new()
    }
}

impl Host for StdHost {
    fn output(&mut self, line: &str) {
        println!("{}", line);
    }

    fn get_input(&mut self) -> String {
        let mut buf = String::new();
        self.stdin
            .lock()
            .read_line(&mut buf)
            .expect("failed to read from stdin");
        buf.trim_end_matches(['\n', '\r']).to_string()
    }
}

/// A scripted host for tests: captures `output` lines and feeds
/// pre-recorded `get_input` responses, per the Testable Properties'
/// literal-I/O end-to-end scenarios.
#[derive(Default)]
pub struct BufferHost {
    pub captured: Vec<String>,
    pub scripted_input: Vec<String>,
}

impl BufferHost {
    pub fn with_input(lines: &[&str]) -> BufferHost {
        BufferHost {
            captured: Vec::new(),
            scripted_input: lines.iter().rev().map(|s| s.to_string()).collect(),
        }
    }
}

impl Host for BufferHost {
    fn output(&mut self, line: &str) {
        self.captured.push(line.to_string());
    }

    fn get_input(&mut self) -> String {
        self.scripted_input.pop().unwrap_or_default()
    }
}
