use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self as term, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use questionnaire::{Pick, Picker, PickerError};
use tracing::debug;

const HINT: &str = "up/down or k/j move | enter select | h or left go back | ctrl-c quit";

/// Raw mode and the alternate screen, held for the duration of one pick.
struct RawTerminal;

impl RawTerminal {
    fn acquire() -> io::Result<Self> {
        term::enable_raw_mode()?;
        let guard = RawTerminal;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = term::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Up,
    Down,
    Select,
    Back,
    Interrupt,
}

fn key_action(key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Interrupt);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(Action::Select),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Back),
        _ => None,
    }
}

/// Arrow-key list picker drawn on the alternate screen.
pub struct TerminalPicker {
    title: Option<String>,
}

impl TerminalPicker {
    pub fn new(title: Option<String>) -> Self {
        Self { title }
    }

    fn draw(
        &self,
        out: &mut impl Write,
        options: &[String],
        prompt: &str,
        indicator: &str,
        selected: usize,
    ) -> io::Result<()> {
        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        if let Some(title) = &self.title {
            queue!(out, Print(title), Print("\r\n\r\n"))?;
        }
        for line in prompt.lines() {
            queue!(out, Print(line), Print("\r\n"))?;
        }
        queue!(out, Print("\r\n"))?;
        let blank = " ".repeat(indicator.chars().count());
        for (index, option) in options.iter().enumerate() {
            let marker = if index == selected { indicator } else { blank.as_str() };
            queue!(out, Print(format!("{} {}\r\n", marker, option)))?;
        }
        queue!(out, Print("\r\n"), Print(HINT))?;
        out.flush()
    }
}

impl Picker for TerminalPicker {
    fn pick(
        &mut self,
        options: &[String],
        prompt: &str,
        indicator: &str,
    ) -> Result<Pick, PickerError> {
        if options.is_empty() {
            return Err(PickerError::NoOptions);
        }
        let _terminal = RawTerminal::acquire()?;
        let mut out = io::stdout();
        let mut selected = 0usize;
        loop {
            self.draw(&mut out, options, prompt, indicator, selected)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key_action(key) {
                Some(Action::Up) => {
                    selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
                }
                Some(Action::Down) => selected = (selected + 1) % options.len(),
                Some(Action::Select) => {
                    debug!(index = selected, "option selected");
                    return Ok(Pick::Selected {
                        index: selected,
                        option: options[selected].clone(),
                    });
                }
                Some(Action::Back) => return Ok(Pick::Back),
                Some(Action::Interrupt) => return Err(PickerError::Interrupted),
                None => {}
            }
        }
    }
}
