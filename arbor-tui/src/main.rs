mod sample;
mod terminal;

use std::fs::File;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use simplelog::{Config, LevelFilter, WriteLogger};

use arbor::{display_hierarchy, flatten_entities, Arena, Collapser, Command, DisplayOps, View};

use crate::terminal::Terminal;

fn main() -> std::io::Result<()> {
    // The terminal is taken over for the UI, so logs go to a file.
    let log_file = File::create("arbor-tui.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut entities = Arena::new();
    let mut roots = sample::create_sample_entities(&mut entities);
    let mut collapser = Collapser::new();

    let mut term = Terminal::new()?;
    let (width, height) = term.size();
    log::info!("terminal {width}x{height}");
    let mut view = View::new(
        flatten_entities(&entities, &collapser, &roots),
        0,
        height.max(1) as usize,
    );
    let ops = DisplayOps::default();

    loop {
        let buffer = term.frame()?;
        display_hierarchy(&entities, &roots, &view, &collapser, &ops, buffer);
        term.flush_frame()?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_quit(&key) {
                return Ok(());
            }
            if let Some(command) = map_key(&key) {
                view.apply(command, &mut entities, &mut collapser, &mut roots);
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn map_key(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Left => Some(Command::Collapse),
        KeyCode::Right => Some(Command::Expand),
        KeyCode::Char('c') => Some(Command::AddChild),
        KeyCode::Char('s') => Some(Command::AddSibling),
        KeyCode::Char('d') => Some(Command::Remove),
        KeyCode::Char('r') => Some(Command::RecordHandle),
        KeyCode::Char('g') => Some(Command::GotoRecorded),
        _ => None,
    }
}
