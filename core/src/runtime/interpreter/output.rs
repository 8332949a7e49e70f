/// Ordered log shared between the interpreter and the handlers it creates.
#[derive(Debug, Default)]
pub(crate) struct Output {
    lines: Vec<String>,
    echo: bool,
}

impl Output {
    pub(crate) fn new(echo: bool) -> Self {
        Self {
            lines: Vec::new(),
            echo,
        }
    }

    pub(crate) fn push(&mut self, line: String) {
        if self.echo {
            println!("{line}");
        }
        self.lines.push(line);
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}
