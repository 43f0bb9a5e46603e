use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use jobseek_core::{update, AppState, Msg};
use jobseek_engine::EngineHandle;
use jobseek_logging::{seek_info, seek_warn};

use crate::commands::{self, Command};
use crate::config::AppConfig;
use crate::effects::{spawn_event_pump, EffectRunner};
use crate::notify::TerminalNotifier;
use crate::render::render;

/// Everything the main loop reacts to.
pub enum Input {
    Command(Command),
    Invalid(String),
    Engine(Msg),
    StdinClosed,
}

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let (engine, events) = EngineHandle::new(config.api_settings())?;
    let runner = EffectRunner::new(engine, Box::new(TerminalNotifier));

    let (tx, rx) = mpsc::channel::<Input>();
    spawn_event_pump(events, tx.clone());
    spawn_stdin_reader(tx);

    seek_info!("Searching {}", config.api_base_url);
    println!("jobseek - type `help` for commands");

    let mut state = dispatch(
        AppState::with_settings(config.search_settings()),
        Msg::Opened,
        &runner,
    );
    while let Ok(input) = rx.recv() {
        let msg = match input {
            Input::Engine(msg) => msg,
            Input::Command(Command::Quit) | Input::StdinClosed => break,
            Input::Command(Command::Help) => {
                println!("{}", commands::HELP);
                continue;
            }
            Input::Command(command) => match command.into_msg(&state) {
                Some(msg) => msg,
                None => continue,
            },
            Input::Invalid(reason) => {
                println!("{reason}");
                continue;
            }
        };
        state = dispatch(state, msg, &runner);
    }

    seek_info!("Leaving search view");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        print!("{}", render(&state.view()));
    }
    state
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let input = match line {
                Ok(line) => match commands::parse(&line) {
                    Ok(Some(command)) => Input::Command(command),
                    Ok(None) => continue,
                    Err(err) => Input::Invalid(err.to_string()),
                },
                Err(err) => {
                    seek_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            if tx.send(input).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::StdinClosed);
    });
}
