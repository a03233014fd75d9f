use crate::app::Response;
use crate::screens::Screen;
use crate::types::TestSuite;
use crate::ui::common_nav::back_or_quit;
use crate::ui::components::heading;
use crate::ui::help;

pub struct TestSuitesScreen {
    target: String,
    suites: Vec<TestSuite>,
}

impl TestSuitesScreen {
    pub fn new(target: String, suites: Vec<TestSuite>) -> Self {
        Self { target, suites }
    }

    pub fn render(&self) -> String {
        let tests: usize = self.suites.iter().map(|s| s.tests.len()).sum();
        let mut out = heading(&format!("Tests in {}", self.target));
        out.push_str(&format!("\n{tests} tests in {} suites\n", self.suites.len()));
        for suite in &self.suites {
            out.push_str(&format!("\n{}\n", suite.name));
            for test in &suite.tests {
                out.push_str(&format!("  - {test}\n"));
            }
        }
        out.push('\n');
        out
    }

    pub fn input_prompt(&self) -> Option<String> {
        Some(help::TEST_SUITES.to_string())
    }

    pub fn accept_line_input(&mut self, line: &str) -> Response<Screen> {
        back_or_quit(line).unwrap_or(Response::Stay)
    }
}
