use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Style hints the stack attaches to what it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Prompt,
    Marker,
}

/// The three terminal primitives the card stack depends on.
#[async_trait]
pub trait Terminal: Send {
    fn clear_screen(&mut self) -> io::Result<()>;
    fn write(&mut self, text: &str, style: Style) -> io::Result<()>;
    /// One line without its line terminator, or `None` at end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Line-oriented console: crossterm for clearing and styling, tokio for reading.
pub struct ConsoleTerminal<R, W> {
    reader: R,
    out: W,
    colorize: bool,
}

impl ConsoleTerminal<BufReader<Stdin>, io::Stdout> {
    /// Acquire stdin/stdout for an interactive session.
    pub fn stdio(colorize: bool) -> Result<Self> {
        let mut out = io::stdout();
        out.flush().context("acquiring terminal output")?;
        Ok(Self::new(BufReader::new(tokio::io::stdin()), out, colorize))
    }
}

impl<R, W> ConsoleTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(reader: R, out: W, colorize: bool) -> Self {
        Self { reader, out, colorize }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.out
    }
}

#[async_trait]
impl<R, W> Terminal for ConsoleTerminal<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    fn write(&mut self, text: &str, style: Style) -> io::Result<()> {
        if !self.colorize || style == Style::Plain {
            queue!(self.out, Print(text))?;
        } else {
            let styled = match style {
                Style::Prompt => text.with(Color::Yellow),
                Style::Marker => text.with(Color::Cyan).attribute(Attribute::Bold),
                Style::Plain => text.stylize(),
            };
            queue!(self.out, PrintStyledContent(styled))?;
        }
        self.out.flush()
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf).await? == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum TermEvent {
        Clear,
        Write(String, Style),
    }

    /// In-memory terminal that feeds canned lines and records output.
    #[derive(Default)]
    pub struct ScriptedTerminal {
        lines: VecDeque<String>,
        events: Vec<TermEvent>,
    }

    impl ScriptedTerminal {
        pub fn with_lines<I>(lines: I) -> Self
        where
            I: IntoIterator,
            I::Item: Into<String>,
        {
            Self { lines: lines.into_iter().map(Into::into).collect(), events: Vec::new() }
        }

        pub fn events(&self) -> &[TermEvent] {
            &self.events
        }

        pub fn unread(&self) -> usize {
            self.lines.len()
        }
    }

    #[async_trait]
    impl Terminal for ScriptedTerminal {
        fn clear_screen(&mut self) -> io::Result<()> {
            self.events.push(TermEvent::Clear);
            Ok(())
        }

        fn write(&mut self, text: &str, style: Style) -> io::Result<()> {
            self.events.push(TermEvent::Write(text.to_string(), style));
            Ok(())
        }

        async fn read_line(&mut self) -> io::Result<Option<String>> {
            Ok(self.lines.pop_front())
        }
    }

    #[tokio::test]
    async fn console_reads_lines_without_terminators() {
        let mut term = ConsoleTerminal::new(&b"first\r\nsecond\nlast"[..], Vec::new(), false);
        assert_eq!(term.read_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(term.read_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(term.read_line().await.unwrap().as_deref(), Some("last"));
        assert_eq!(term.read_line().await.unwrap(), None);
    }

    #[test]
    fn console_writes_plain_text_when_not_colorized() {
        let mut term = ConsoleTerminal::new(&b""[..], Vec::new(), false);
        term.write("pick one", Style::Prompt).unwrap();
        term.write("> ", Style::Marker).unwrap();
        let out = String::from_utf8(term.into_writer()).unwrap();
        assert_eq!(out, "pick one> ");
    }

    #[test]
    fn console_styles_prompts_when_colorized() {
        let mut term = ConsoleTerminal::new(&b""[..], Vec::new(), true);
        term.write("pick one", Style::Prompt).unwrap();
        let out = String::from_utf8(term.into_writer()).unwrap();
        assert!(out.contains("pick one"));
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn console_clear_emits_escape_sequence() {
        let mut term = ConsoleTerminal::new(&b""[..], Vec::new(), true);
        term.clear_screen().unwrap();
        let out = term.into_writer();
        assert!(out.starts_with(b"\x1b["));
    }
}
