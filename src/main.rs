// coralc: Coral front end driver

use std::fs;
use std::io;
use std::process;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use coralc::cli::{exit_code, Cli};
use coralc::parser::lexer::Lexer;
use coralc::parser::parse::Parser;
use coralc::report::{format_parse_info, format_tokens};
use coralc::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            if let Err(io_err) = e.print() {
                eprintln!("Error: {}", io_err);
                process::exit(1);
            }
            process::exit(exit_code(&e));
        }
    };

    if !cli.input.exists() {
        eprintln!("Error: File '{}' not found", cli.input.display());
        eprintln!("Usage: coralc <file.crl> [--tokens] [--types] [--inspect]");
        process::exit(1);
    }

    let source = fs::read_to_string(&cli.input)?;

    if cli.inspect {
        return run_inspector(source);
    }

    eprintln!("Tokenizing {}...", cli.input.display());
    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if cli.tokens {
        print!("{}", format_tokens(&tokens));
    }

    let info = match Parser::new(tokens).parse() {
        Ok(info) => info,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} types, {} functions, {} globals.",
        info.types.len(),
        info.functions.len(),
        info.global_vars.len()
    );

    if cli.types || !cli.tokens {
        print!("{}", format_parse_info(&info));
    }

    Ok(())
}

fn run_inspector(source: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(source);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
        process::exit(1);
    }

    if let Some(e) = &app.error {
        eprintln!("{}", e);
        process::exit(1);
    }

    Ok(())
}
