pub mod group;
pub mod result;
pub mod snippet;
pub mod test_suites;
pub mod test_targets;
pub mod top;

use async_trait::async_trait;

pub use group::GroupScreen;
pub use result::ResultScreen;
pub use snippet::SnippetScreen;
pub use test_suites::TestSuitesScreen;
pub use test_targets::TestTargetsScreen;
pub use top::TopScreen;

use crate::app::{Card, Response};

/// Every screen the session can show.
pub enum Screen {
    Top(TopScreen),
    Group(GroupScreen),
    Snippet(SnippetScreen),
    Result(ResultScreen),
    TestTargets(TestTargetsScreen),
    TestSuites(TestSuitesScreen),
}

#[async_trait]
impl Card for Screen {
    fn render(&self) -> String {
        match self {
            Screen::Top(s) => s.render(),
            Screen::Group(s) => s.render(),
            Screen::Snippet(s) => s.render(),
            Screen::Result(s) => s.render(),
            Screen::TestTargets(s) => s.render(),
            Screen::TestSuites(s) => s.render(),
        }
    }

    fn input_prompt(&self) -> Option<String> {
        match self {
            Screen::Top(s) => s.input_prompt(),
            Screen::Group(s) => s.input_prompt(),
            Screen::Snippet(s) => s.input_prompt(),
            Screen::Result(s) => s.input_prompt(),
            Screen::TestTargets(s) => s.input_prompt(),
            Screen::TestSuites(s) => s.input_prompt(),
        }
    }

    async fn accept_line_input(&mut self, line: &str) -> Response<Screen> {
        match self {
            Screen::Top(s) => s.accept_line_input(line),
            Screen::Group(s) => s.accept_line_input(line),
            Screen::Snippet(s) => s.accept_line_input(line).await,
            Screen::Result(s) => s.accept_line_input(line),
            Screen::TestTargets(s) => s.accept_line_input(line).await,
            Screen::TestSuites(s) => s.accept_line_input(line),
        }
    }
}
