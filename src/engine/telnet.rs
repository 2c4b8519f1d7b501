//! Line framing for raw telnet clients.
//!
//! Telnet option negotiation (`IAC <cmd> <opt>`, `IAC SB ... IAC SE`) is
//! stripped and never answered; whatever is left is split into lines.

const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;
const WILL: u8 = 251;
const DONT: u8 = 254;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Data,
    Iac,
    Option,
    Subneg,
    SubnegIac,
}

/// Streaming decoder: feed it socket chunks, get complete input lines back.
#[derive(Debug)]
pub struct LineDecoder {
    state: State,
    line: Vec<u8>,
    max_line_len: usize,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Data,
            line: Vec::new(),
            max_line_len: 4 * 1024,
        }
    }

    pub fn max_line_len(mut self, max: usize) -> Self {
        self.max_line_len = max.max(1);
        self
    }

    /// Returns every line completed by `chunk`, without its `\r\n`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Overlong lines are cut
    /// at the limit and the excess is discarded.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &b in chunk {
            self.state = match (self.state, b) {
                (State::Data, IAC) => State::Iac,
                (State::Data, b'\n') => {
                    if self.line.last() == Some(&b'\r') {
                        self.line.pop();
                    }
                    lines.push(String::from_utf8_lossy(&self.line).into_owned());
                    self.line.clear();
                    State::Data
                }
                (State::Data, b) => {
                    if self.line.len() < self.max_line_len {
                        self.line.push(b);
                    }
                    State::Data
                }
                (State::Iac, IAC) => {
                    if self.line.len() < self.max_line_len {
                        self.line.push(IAC);
                    }
                    State::Data
                }
                (State::Iac, WILL..=DONT) => State::Option,
                (State::Iac, SB) => State::Subneg,
                (State::Iac, _) | (State::Option, _) => State::Data,
                (State::Subneg, IAC) => State::SubnegIac,
                (State::Subneg, _) => State::Subneg,
                (State::SubnegIac, SE) => State::Data,
                (State::SubnegIac, _) => State::Subneg,
            };
        }
        lines
    }
}
