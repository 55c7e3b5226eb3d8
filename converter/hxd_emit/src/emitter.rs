//! Indented line emitter.
//!
//! Builds the output text line by line. The emitter owns the current
//! indentation level (4 spaces per step), so callers only push whole
//! lines and adjust nesting around block bodies.

/// String-based line emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
    level: usize,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            level: 0,
        }
    }

    /// Emit one line at the current indentation, followed by a newline.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.level * 4 {
            self.buffer.push(' ');
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Emit an empty line (no indentation).
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Increase nesting by one step.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decrease nesting by one step (floor 0).
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the emitter and return the built text.
    pub fn output(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_indentation() {
        let mut emitter = StringEmitter::new();
        emitter.line("outer {");
        emitter.indent();
        emitter.line("inner;");
        emitter.dedent();
        emitter.line("}");
        assert_eq!(emitter.output(), "outer {\n    inner;\n}\n");
    }

    #[test]
    fn blank_lines_have_no_indentation() {
        let mut emitter = StringEmitter::new();
        emitter.indent();
        emitter.blank();
        emitter.line("x");
        assert_eq!(emitter.output(), "\n    x\n");
    }

    #[test]
    fn dedent_saturates_at_zero() {
        let mut emitter = StringEmitter::new();
        emitter.dedent();
        emitter.line("x");
        assert_eq!(emitter.output(), "x\n");
    }

    #[test]
    fn with_capacity_starts_empty() {
        let emitter = StringEmitter::with_capacity(256);
        assert!(emitter.is_empty());
        assert_eq!(emitter.len(), 0);
    }
}
