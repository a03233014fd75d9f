use crate::app::{AppCtx, Response};
use crate::screens::{GroupScreen, Screen, TestTargetsScreen};
use crate::ui::common_nav::{is_quit, select};
use crate::ui::components::{heading, numbered_list, summary};
use crate::ui::help;

/// Root screen: the package and its snippet groups.
pub struct TopScreen {
    ctx: AppCtx,
}

impl TopScreen {
    pub fn new(ctx: AppCtx) -> Self {
        Self { ctx }
    }

    fn has_tests(&self) -> bool {
        !self.ctx.package.test_targets.is_empty()
    }

    pub fn render(&self) -> String {
        let pkg = &self.ctx.package;
        let mut out = heading(&pkg.name);
        out.push('\n');

        if pkg.snippet_groups.is_empty() {
            out.push_str("This package has no snippets.\n");
        } else {
            out.push_str(&format!("Snippet groups ({} snippets):\n", pkg.total_snippets()));
            out.push_str(&numbered_list(
                pkg.snippet_groups.iter().map(|g| (g.name.as_str(), summary(&g.explanation))),
            ));
        }

        if self.has_tests() {
            out.push_str(&format!("\nTest targets: {}\n", pkg.test_targets.len()));
        }
        out.push('\n');
        out
    }

    pub fn input_prompt(&self) -> Option<String> {
        Some(if self.has_tests() { help::TOP_WITH_TESTS } else { help::TOP }.to_string())
    }

    pub fn accept_line_input(&mut self, line: &str) -> Response<Screen> {
        if line.is_empty() || is_quit(line) {
            return Response::Quit;
        }
        if line.eq_ignore_ascii_case("tests") || line.eq_ignore_ascii_case("t") {
            return if self.has_tests() {
                Response::Push(Screen::TestTargets(TestTargetsScreen::new(self.ctx.clone())))
            } else {
                Response::Stay
            };
        }

        let groups = &self.ctx.package.snippet_groups;
        match select(line, groups.iter().map(|g| g.name.as_str())) {
            Some(idx) => {
                let group = GroupScreen::new(self.ctx.clone(), groups[idx].clone());
                Response::Push(Screen::Group(group))
            }
            None => Response::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::tests::{ctx, FakeInvoker};
    use std::sync::Arc;

    #[test]
    fn lists_groups_and_mentions_tests() {
        let top = TopScreen::new(ctx(&["api"], Arc::default()));
        let out = top.render();
        assert!(out.starts_with("demo\n====\n"));
        assert!(out.contains("Snippet groups (3 snippets):"));
        assert!(out.contains("  1. basics - Start here.\n  2. advanced\n"));
        assert!(out.contains("Test targets: 1"));
        assert_eq!(top.input_prompt().as_deref(), Some(help::TOP_WITH_TESTS));
    }

    #[test]
    fn picks_groups_and_quits() {
        let mut top = TopScreen::new(ctx(&[], Arc::<FakeInvoker>::default()));
        assert!(matches!(top.accept_line_input("2"), Response::Push(Screen::Group(_))));
        assert!(matches!(top.accept_line_input("BASICS"), Response::Push(Screen::Group(_))));
        assert!(matches!(top.accept_line_input("9"), Response::Stay));
        assert!(matches!(top.accept_line_input("tests"), Response::Stay));
        assert!(matches!(top.accept_line_input(""), Response::Quit));
        assert!(matches!(top.accept_line_input("q"), Response::Quit));
    }

    #[test]
    fn tests_entry_opens_targets_when_present() {
        let mut top = TopScreen::new(ctx(&["api"], Arc::default()));
        assert!(matches!(top.accept_line_input("tests"), Response::Push(Screen::TestTargets(_))));
    }
}
