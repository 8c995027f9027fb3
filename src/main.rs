// sortty: sorting visualizer with pausable, rewindable stepwise playback

mod engine;
mod history;
mod render;
mod ui;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use engine::continuation::Algorithm;
use engine::{Engine, DEFAULT_HISTORY_LIMIT};
use ui::App;

fn usage(program_name: &str) -> ! {
    eprintln!("Usage: {} [algorithm] [size]", program_name);
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  algorithm   bubble | merge | quick   (default: bubble)");
    eprintln!("  size        dataset size, 10-200     (default: 20)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {}                # bubble sort over 20 elements", program_name);
    eprintln!("  {} quick 50       # quick sort over 50 elements", program_name);
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("sortty");

    let mut algorithm = Algorithm::Bubble;
    let mut size: usize = 20;

    for arg in &args[1..] {
        if let Some(parsed) = Algorithm::from_name(arg) {
            algorithm = parsed;
        } else if let Ok(parsed) = arg.parse::<usize>() {
            if !(10..=200).contains(&parsed) {
                eprintln!("Error: size {} out of range (10-200)", parsed);
                usage(program_name);
            }
            size = parsed;
        } else {
            eprintln!("Error: unrecognized argument '{}'", arg);
            usage(program_name);
        }
    }

    let engine = Engine::new(algorithm, DEFAULT_HISTORY_LIMIT);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(engine, size);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
