use crate::app::Response;
use crate::screens::Screen;
use crate::types::RunOutput;
use crate::ui::components::heading;
use crate::ui::help;

/// Captured output of a finished run.
pub struct ResultScreen {
    title: String,
    output: RunOutput,
}

impl ResultScreen {
    pub fn new(title: String, output: RunOutput) -> Self {
        Self { title, output }
    }

    pub fn render(&self) -> String {
        let mut out = heading(&self.title);
        out.push('\n');
        out.push_str(&self.output.stdout);
        if !self.output.stdout.is_empty() && !self.output.stdout.ends_with('\n') {
            out.push('\n');
        }
        if !self.output.stderr.trim().is_empty() {
            out.push_str("\nstderr:\n");
            out.push_str(&self.output.stderr);
            if !self.output.stderr.ends_with('\n') {
                out.push('\n');
            }
        }
        match self.output.exit_code {
            Some(code) => out.push_str(&format!("\n(exit code {code})\n\n")),
            None => out.push_str("\n(terminated by signal)\n\n"),
        }
        out
    }

    pub fn input_prompt(&self) -> Option<String> {
        Some(help::OUTPUT.to_string())
    }

    pub fn accept_line_input(&mut self, _line: &str) -> Response<Screen> {
        Response::Pop(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_stdout_stderr_and_exit_code() {
        let mut s = ResultScreen::new(
            "Output of hello".into(),
            RunOutput { exit_code: Some(0), stdout: "hi".into(), stderr: "warn\n".into() },
        );
        assert_eq!(
            s.render(),
            "Output of hello\n===============\n\nhi\n\nstderr:\nwarn\n\n(exit code 0)\n\n"
        );
        assert!(matches!(s.accept_line_input("anything"), Response::Pop(None)));
    }

    #[test]
    fn failed_runs_still_show_their_output() {
        let s = ResultScreen::new(
            "Output of hello".into(),
            RunOutput {
                exit_code: Some(3),
                stdout: "partial output\n".into(),
                stderr: String::new(),
            },
        );
        assert!(s.render().ends_with("\npartial output\n\n(exit code 3)\n\n"));

        let killed = ResultScreen::new(
            "Output of hello".into(),
            RunOutput { exit_code: None, stdout: String::new(), stderr: String::new() },
        );
        assert!(killed.render().ends_with("(terminated by signal)\n\n"));
    }
}
