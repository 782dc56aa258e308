//! Console player mode
//!
//! Plays a case in the terminal. Every input line becomes one
//! [`InputEvent`]; between inputs the game is ticked on a simulated clock
//! until it needs the player again.

use crate::cli::view_state::{ViewState, render_delta};
use crate::config::EngineConfig;
use crate::presenter::Recorder;
use crate::runtime::debug::DebugSnapshot;
use crate::runtime::interpreter::ParseStatus;
use crate::runtime::Game;
use crate::storage::CaseFile;
use crate::types::event::{InputEvent, Key};
use crate::types::screen::Screen;
use crate::types::state::PAGE_SIZE;
use std::io::{self, BufRead, Write};

/// Simulated frame length
const FRAME_MS: u64 = 16;
/// Give up settling after this many frames without needing the player
const MAX_FRAMES: usize = 100_000;

const CONTROLS: [&str; 4] = ["Examine", "Move", "Talk", "Present"];

/// One line of player input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(InputEvent),
    Help,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(Command::Input(InputEvent::KeyDown(Key::Confirm)));
    };

    let key = |k| Ok(Command::Input(InputEvent::KeyDown(k)));
    match word {
        "n" => key(Key::Confirm),
        "l" => key(Key::Left),
        "r" => key(Key::Right),
        "u" => key(Key::Up),
        "d" => key(Key::Down),
        "b" => key(Key::Back),
        "c" => key(Key::CourtRecord),
        "p" => key(Key::Press),
        "present" => key(Key::Present),
        "click" => {
            let mut coord = || {
                words
                    .next()
                    .and_then(|w| w.parse::<i32>().ok())
                    .ok_or_else(|| "usage: click X Y".to_string())
            };
            let x = coord()?;
            let y = coord()?;
            Ok(Command::Input(InputEvent::MouseDown { x, y }))
        }
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', type 'help' for the controls")),
    }
}

/// Run the player mode over stdin
pub fn run_play(file: CaseFile, config: EngineConfig, debug: bool) -> anyhow::Result<()> {
    let sounds = config.sounds.clone();
    let title = file.case.overview.name.clone();
    let mut game = Game::new(file.case, Recorder::new(), config);
    let mut view = ViewState::new();
    let mut now = 0;

    println!("=== {} ===", if title.is_empty() { "casedeck" } else { title.as_str() });
    println!("case digest {}", file.digest);
    println!();
    print_controls();

    if !game.start() {
        anyhow::bail!("the initial block cannot be run");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        now = settle(&mut game, now);

        let effects = game.take_effects();
        let directives = game.presenter_mut().drain();
        let delta = view.apply(game.state(), effects, &directives, &sounds);
        let location_name = game.current_location().map(|l| l.name.as_str());
        render_delta(&delta, location_name);
        show(&game);

        if debug {
            println!("[debug]");
            println!("{}", DebugSnapshot::capture(&game).to_json()?);
            println!();
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };

        match parse_command(&line?) {
            Ok(Command::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(Command::Help) => print_controls(),
            Ok(Command::Input(event)) => game.handle(event),
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

/// Tick until the game waits for the player; returns the new clock
pub fn settle(game: &mut Game<Recorder>, mut now: u64) -> u64 {
    for _ in 0..MAX_FRAMES {
        now += FRAME_MS;
        let status = game.tick(now);
        if needs_player(game, &status) {
            return now;
        }
    }
    log::warn!("game did not settle after {MAX_FRAMES} frames");
    now
}

fn needs_player(game: &Game<Recorder>, status: &ParseStatus) -> bool {
    if game.state().sequence.is_some() {
        return false;
    }
    let parser = game.parser();
    match status {
        ParseStatus::Idle | ParseStatus::Finished => true,
        ParseStatus::Goto(_) => false,
        ParseStatus::Paused => {
            parser.is_waiting() || (parser.is_revealed() && !parser.has_timed_goto())
        }
    }
}

fn print_controls() {
    println!("Controls:");
    println!("  Enter/n:    confirm");
    println!("  l r u d:    arrows");
    println!("  b:          back");
    println!("  c:          court record");
    println!("  p:          press");
    println!("  present:    present the selected item");
    println!("  click X Y:  touch the lower screen");
    println!("  q:          quit");
    println!();
}

/// Print what the current screen shows
fn show(game: &Game<Recorder>) {
    let state = game.state();
    let case = game.case();
    let parser = game.parser();

    if parser.is_active() {
        let speaker = parser
            .speaker()
            .and_then(|id| case.character(id))
            .map(|c| c.name.as_str());
        if let Some(name) = speaker {
            println!("{name}:");
        }
        println!("{}", parser.visible_text());
        println!();
    }

    match state.screen.screen {
        Screen::Main if state.screen.overlays.controls => {
            let count = if game.location_character().is_some() { 4 } else { 2 };
            let row = CONTROLS[..count]
                .iter()
                .enumerate()
                .map(|(i, label)| marked(*label, i == state.selected_control))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{row}");
        }
        Screen::Main => {}
        Screen::Examine => {
            println!("Examine: cursor at ({}, {})", state.examine.x, state.examine.y);
        }
        Screen::Move => {
            let targets = game
                .current_location()
                .map(|l| l.move_locations.clone())
                .unwrap_or_default();
            for (i, id) in targets.iter().enumerate() {
                let name = case.location(id).map_or(id.as_str(), |l| l.name.as_str());
                println!("{}", marked(name, i == state.selected_location));
            }
        }
        Screen::Talk => {
            for (i, option) in game.talk_options().iter().enumerate() {
                println!("{}", marked(&option.label, i == state.selected_talk_option));
            }
        }
        Screen::EvidencePage | Screen::ProfilesPage => {
            let evidence = state.screen.screen.is_evidence();
            let (items, page, selected) = if evidence {
                (&state.visible_evidence, state.evidence_page, state.selected_evidence)
            } else {
                (&state.visible_profiles, state.profiles_page, state.selected_profile)
            };
            println!("{} (page {})", if evidence { "Evidence" } else { "Profiles" }, page + 1);
            for (i, id) in items.iter().skip(page * PAGE_SIZE).take(PAGE_SIZE).enumerate() {
                let name = if evidence {
                    case.evidence(id).map(|e| e.name.as_str())
                } else {
                    case.character(id).map(|c| c.name.as_str())
                };
                println!("{}", marked(name.unwrap_or(id.as_str()), i == selected));
            }
        }
        Screen::EvidenceInfo | Screen::ProfileInfo => {
            let evidence = state.screen.screen.is_evidence();
            let Some(id) = state.selected_item(evidence) else {
                return;
            };
            let (name, caption, description) = if evidence {
                case.evidence(id)
                    .map(|e| (e.name.as_str(), e.caption.as_str(), e.description.as_str()))
                    .unwrap_or((id, "", ""))
            } else {
                case.character(id)
                    .map(|c| (c.name.as_str(), c.caption.as_str(), c.description.as_str()))
                    .unwrap_or((id, "", ""))
            };
            println!("{name} - {caption}");
            println!("{description}");
        }
    }
    println!();
}

fn marked(label: &str, selected: bool) -> String {
    if selected {
        format!("[{label}]")
    } else {
        format!(" {label} ")
    }
}
