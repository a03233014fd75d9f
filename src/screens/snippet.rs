use crate::app::{AppCtx, Response};
use crate::catalog::Snippet;
use crate::screens::{ResultScreen, Screen};
use crate::ui::common_nav::back_or_quit;
use crate::ui::components::{code_block, heading, wrapped};
use crate::ui::help;

pub struct SnippetScreen {
    ctx: AppCtx,
    snippet: Snippet,
}

impl SnippetScreen {
    pub fn new(ctx: AppCtx, snippet: Snippet) -> Self {
        Self { ctx, snippet }
    }

    pub fn render(&self) -> String {
        let mut out = heading(&self.snippet.name);
        if !self.snippet.explanation.is_empty() {
            out.push('\n');
            out.push_str(&wrapped(&self.snippet.explanation));
            out.push('\n');
        }
        if !self.snippet.presentation_code.is_empty() {
            out.push('\n');
            out.push_str(&code_block(&self.snippet.presentation_code));
            out.push('\n');
        }
        if self.snippet.example.is_none() {
            out.push_str("\n(not runnable: add it to Cargo.toml as an [[example]] target)\n");
        }
        out.push('\n');
        out
    }

    pub fn input_prompt(&self) -> Option<String> {
        Some(help::SNIPPET.to_string())
    }

    pub async fn accept_line_input(&mut self, line: &str) -> Response<Screen> {
        if let Some(r) = back_or_quit(line) {
            return r;
        }
        if !(line.eq_ignore_ascii_case("r") || line.eq_ignore_ascii_case("run")) {
            return Response::Stay;
        }

        match self.ctx.invoker.run_snippet(&self.snippet).await {
            Ok(output) => Response::Push(Screen::Result(ResultScreen::new(
                format!("Output of {}", self.snippet.name),
                output,
            ))),
            Err(e) => Response::Pop(Some(
                anyhow::Error::new(e).context(format!("running snippet `{}`", self.snippet.name)),
            )),
        }
    }
}
