use std::fmt::Display;

const INDENT: &str = "    ";

/// Line-oriented buffer for the member sections spliced into Java templates.
pub struct StringBuilder {
    lines: Vec<String>,
    depth: usize,
}

impl StringBuilder {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn with_depth(depth: usize) -> Self {
        Self {
            lines: Vec::new(),
            depth,
        }
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }

    pub fn push<T: Display>(&mut self, text: T) {
        let text = text.to_string();

        for line in text.split('\n') {
            if line.is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines
                    .push(format!("{}{line}", INDENT.repeat(self.depth)));
            }
        }
    }

    /// Javadoc block; nothing is emitted for an empty comment.
    pub fn doc_comment(&mut self, comment: &str) {
        if comment.is_empty() {
            return;
        }

        self.push("/**");
        for line in comment.lines() {
            let line = line.trim().replace("*/", "*&#47;");
            if line.is_empty() {
                self.push(" *");
            } else {
                self.push(format!(" * {line}"));
            }
        }
        self.push(" */");
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl FromIterator<String> for StringBuilder {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut builder = StringBuilder::new();

        for line in iter {
            builder.push(line);
        }

        builder
    }
}
