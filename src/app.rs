use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::catalog::Package;
use crate::commands::invoke::Invoker;
use crate::logging::ErrorSink;
use crate::tui::{Style, Terminal};
use crate::types::TestConfig;

/// What a card asks the stack to do after handling one line of input.
pub enum Response<C> {
    /// Input was not actionable; ask the same card again without re-rendering.
    Stay,
    Push(C),
    /// Leave the current card. An error is reported and keeps the screen from being cleared.
    Pop(Option<anyhow::Error>),
    Quit,
}

impl<C> std::fmt::Debug for Response<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Stay => f.write_str("Stay"),
            Response::Push(_) => f.write_str("Push(..)"),
            Response::Pop(None) => f.write_str("Pop"),
            Response::Pop(Some(e)) => write!(f, "Pop({e:#})"),
            Response::Quit => f.write_str("Quit"),
        }
    }
}

/// One interactive screen. Cards never see the stack they live in.
#[async_trait]
pub trait Card: Send + Sized {
    /// Full text of the screen for the current state. Must be side-effect free.
    fn render(&self) -> String;

    /// Shown right before the input marker, once per input request.
    fn input_prompt(&self) -> Option<String> {
        None
    }

    /// Handle one line, already trimmed by the stack.
    async fn accept_line_input(&mut self, line: &str) -> Response<Self>;
}

/// Shared handles that child cards need to build their own children.
#[derive(Clone)]
pub struct AppCtx {
    pub package: Arc<Package>,
    pub invoker: Arc<dyn Invoker>,
    pub test_config: TestConfig,
}

/// How a session came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    StackEmptied,
    /// Input ran out; the stack is left as it was.
    InputExhausted { depth: usize },
}

/// What the loop does after a response has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Reprompt,
    Rerender,
    End,
}

pub const INPUT_MARKER: &str = "> ";

/// Strips whitespace from both ends only. Whitespace-only input becomes empty.
pub fn normalize_line(line: &str) -> &str {
    line.trim()
}

pub struct CardStack<C: Card> {
    cards: Vec<C>,
    needs_to_clear_screen: bool,
    sink: Box<dyn ErrorSink>,
}

impl<C: Card> CardStack<C> {
    pub fn new(root: C, sink: Box<dyn ErrorSink>) -> Self {
        Self { cards: vec![root], needs_to_clear_screen: true, sink }
    }

    pub fn depth(&self) -> usize {
        self.cards.len()
    }

    pub fn needs_to_clear_screen(&self) -> bool {
        self.needs_to_clear_screen
    }

    /// Run until the stack empties, a card quits, or input runs out.
    pub async fn run(&mut self, term: &mut dyn Terminal) -> Result<SessionEnd> {
        loop {
            if self.cards.is_empty() {
                return Ok(SessionEnd::StackEmptied);
            }

            if self.needs_to_clear_screen {
                term.clear_screen()?;
                self.needs_to_clear_screen = false;
            }

            let Some(top) = self.cards.last_mut() else {
                return Ok(SessionEnd::StackEmptied);
            };
            term.write(&top.render(), Style::Plain)?;

            let flow = loop {
                let depth = self.cards.len();
                let Some(top) = self.cards.last_mut() else {
                    break Flow::Rerender;
                };
                if let Some(prompt) = top.input_prompt() {
                    term.write(&prompt, Style::Prompt)?;
                    term.write("\n", Style::Plain)?;
                }
                term.write(INPUT_MARKER, Style::Marker)?;

                let Some(line) = term.read_line().await? else {
                    tracing::debug!(depth, "input exhausted");
                    return Ok(SessionEnd::InputExhausted { depth });
                };

                let response = top.accept_line_input(normalize_line(&line)).await;
                tracing::debug!(?response, depth, "card responded");
                match self.apply(response) {
                    Flow::Reprompt => continue,
                    other => break other,
                }
            };

            if flow == Flow::End {
                return Ok(SessionEnd::Quit);
            }
        }
    }

    /// Apply one response to the stack and the repaint flag.
    fn apply(&mut self, response: Response<C>) -> Flow {
        match response {
            Response::Stay => Flow::Reprompt,
            Response::Push(card) => {
                self.cards.push(card);
                self.needs_to_clear_screen = true;
                Flow::Rerender
            }
            Response::Pop(error) => {
                if self.cards.pop().is_none() {
                    unreachable!("pop requested with an empty card stack");
                }
                match error {
                    Some(e) => {
                        self.sink.report(&e);
                        self.needs_to_clear_screen = false;
                    }
                    None => self.needs_to_clear_screen = !self.cards.is_empty(),
                }
                Flow::Rerender
            }
            Response::Quit => Flow::End,
        }
    }
}
