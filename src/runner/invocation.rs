//! A single command invocation.

/// A command line plus the bytes to feed its stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// The shell command line to execute. Passed to the shell verbatim.
    pub command: String,
    /// Bytes written to the child's stdin before it is closed.
    ///
    /// `None` means stdin is closed immediately without writing anything.
    pub input: Option<Vec<u8>>,
}

impl Invocation {
    /// Create an invocation with no input.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            input: None,
        }
    }

    /// Set the stdin payload.
    pub fn input(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set or clear the stdin payload.
    pub fn maybe_input(mut self, input: Option<Vec<u8>>) -> Self {
        self.input = input;
        self
    }

    /// Input bytes to write, treating an empty payload as no input.
    pub(crate) fn input_bytes(&self) -> Option<&[u8]> {
        self.input.as_deref().filter(|bytes| !bytes.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_new() {
        let inv = Invocation::new("ls -la");
        assert_eq!(inv.command, "ls -la");
        assert!(inv.input.is_none());
        assert!(inv.input_bytes().is_none());
    }

    #[test]
    fn test_invocation_input() {
        let inv = Invocation::new("cat").input("abc");
        assert_eq!(inv.input.as_deref(), Some(&b"abc"[..]));
        assert_eq!(inv.input_bytes(), Some(&b"abc"[..]));
    }

    #[test]
    fn test_empty_input_is_not_written() {
        let inv = Invocation::new("cat").input(Vec::new());
        assert!(inv.input.is_some());
        assert!(inv.input_bytes().is_none());
    }

    #[test]
    fn test_maybe_input_clears() {
        let inv = Invocation::new("cat").input("x").maybe_input(None);
        assert!(inv.input.is_none());
    }
}
