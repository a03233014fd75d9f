use crate::app::{AppCtx, Response};
use crate::screens::{Screen, TestSuitesScreen};
use crate::ui::common_nav::{back_or_quit, select};
use crate::ui::components::{heading, numbered_list};
use crate::ui::help;

/// The package's test targets; picking one lists its tests.
pub struct TestTargetsScreen {
    ctx: AppCtx,
}

impl TestTargetsScreen {
    pub fn new(ctx: AppCtx) -> Self {
        Self { ctx }
    }

    pub fn render(&self) -> String {
        let mut out = heading("Test targets");
        out.push('\n');
        let targets = self.ctx.package.test_targets.iter().map(|t| (t.as_str(), ""));
        out.push_str(&numbered_list(targets));
        out.push('\n');
        out
    }

    pub fn input_prompt(&self) -> Option<String> {
        Some(help::TEST_TARGETS.to_string())
    }

    pub async fn accept_line_input(&mut self, line: &str) -> Response<Screen> {
        if let Some(r) = back_or_quit(line) {
            return r;
        }
        let targets = &self.ctx.package.test_targets;
        let Some(idx) = select(line, targets.iter().map(String::as_str)) else {
            return Response::Stay;
        };
        let target = &targets[idx];

        match self.ctx.invoker.discover_tests(target, &self.ctx.test_config).await {
            Ok(suites) => {
                Response::Push(Screen::TestSuites(TestSuitesScreen::new(target.clone(), suites)))
            }
            Err(e) => Response::Pop(Some(
                anyhow::Error::new(e).context(format!("listing tests of `{target}`")),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::tests::{ctx, FakeInvoker};
    use std::sync::Arc;

    #[test]
    fn lists_targets() {
        let s = TestTargetsScreen::new(ctx(&["api", "smoke"], Arc::default()));
        assert_eq!(s.render(), "Test targets\n============\n\n  1. api\n  2. smoke\n\n");
    }

    #[tokio::test]
    async fn discovery_success_pushes_suites() {
        let invoker = Arc::new(FakeInvoker::default());
        let mut s = TestTargetsScreen::new(ctx(&["api", "smoke"], invoker.clone()));
        let response = s.accept_line_input("smoke").await;
        assert!(matches!(response, Response::Push(Screen::TestSuites(_))));
        assert!(matches!(s.accept_line_input("7").await, Response::Stay));
        assert_eq!(*invoker.calls.lock().unwrap(), vec!["tests smoke".to_string()]);
    }

    #[tokio::test]
    async fn discovery_failure_pops_with_error() {
        let invoker = Arc::new(FakeInvoker { fail: true, ..FakeInvoker::default() });
        let mut s = TestTargetsScreen::new(ctx(&["api"], invoker));
        match s.accept_line_input("1").await {
            Response::Pop(Some(e)) => assert_eq!(
                format!("{e:#}"),
                "listing tests of `api`: malformed test listing at line 1: garbage"
            ),
            other => panic!("expected error pop, got {other:?}"),
        }
    }
}
