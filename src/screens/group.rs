use crate::app::{AppCtx, Response};
use crate::catalog::SnippetGroup;
use crate::screens::{Screen, SnippetScreen};
use crate::ui::common_nav::{back_or_quit, select};
use crate::ui::components::{heading, numbered_list, summary, wrapped};
use crate::ui::help;

pub struct GroupScreen {
    ctx: AppCtx,
    group: SnippetGroup,
}

impl GroupScreen {
    pub fn new(ctx: AppCtx, group: SnippetGroup) -> Self {
        Self { ctx, group }
    }

    pub fn render(&self) -> String {
        let mut out = heading(&self.group.name);
        if !self.group.explanation.is_empty() {
            out.push('\n');
            out.push_str(&wrapped(&self.group.explanation));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&numbered_list(
            self.group.snippets.iter().map(|s| (s.name.as_str(), summary(&s.explanation))),
        ));
        out.push('\n');
        out
    }

    pub fn input_prompt(&self) -> Option<String> {
        Some(help::GROUP.to_string())
    }

    pub fn accept_line_input(&mut self, line: &str) -> Response<Screen> {
        if let Some(r) = back_or_quit(line) {
            return r;
        }
        match select(line, self.group.snippets.iter().map(|s| s.name.as_str())) {
            Some(idx) => Response::Push(Screen::Snippet(SnippetScreen::new(
                self.ctx.clone(),
                self.group.snippets[idx].clone(),
            ))),
            None => Response::Stay,
        }
    }
}
