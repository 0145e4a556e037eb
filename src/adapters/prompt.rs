use crate::domain::ports::PasswordPrompt;
use crate::utils::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

/// 終端機上以遮罩方式輸入密碼；stdin 不是 TTY 時改為讀取一行
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, label: &str) -> Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}", label)?;
        stderr.flush()?;

        if !io::stdin().is_terminal() {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            return Ok(line.trim_end_matches(['\r', '\n']).to_string());
        }

        enable_raw_mode()?;
        let entered = read_masked();
        disable_raw_mode()?;
        writeln!(stderr)?;

        Ok(entered?)
    }
}

fn read_masked() -> io::Result<String> {
    let mut buffer = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(buffer),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "password entry cancelled",
                ));
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }
}
