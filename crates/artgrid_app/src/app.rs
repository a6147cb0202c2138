use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use artgrid_core::{update, AppState, Msg};
use artgrid_logging::grid_info;

use crate::cli::Cli;
use crate::commands::{parse_command, to_msg, Command, HELP};
use crate::effects::EffectRunner;
use crate::render::render;

/// Everything the message loop reacts to.
pub enum Input {
    Line(String),
    Engine(Msg),
    Closed,
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(cli.fetch_settings(), input_tx.clone())?;
    spawn_stdin_reader(input_tx);

    grid_info!("artgrid started against {}", cli.base_url);
    println!("{HELP}");

    let mut state = dispatch(AppState::new(), Msg::Started, &runner);
    while let Ok(input) = input_rx.recv() {
        let msg = match input {
            Input::Engine(msg) => msg,
            Input::Line(line) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => {
                    println!("{HELP}");
                    prompt();
                    continue;
                }
                Ok(Command::Show) => {
                    print!("{}", render(&state.view()));
                    prompt();
                    continue;
                }
                Ok(command) => match to_msg(command, &state.view()) {
                    Some(msg) => msg,
                    None => {
                        println!("nothing to do");
                        prompt();
                        continue;
                    }
                },
                Err(err) => {
                    println!("{err}");
                    prompt();
                    continue;
                }
            },
            Input::Closed => break,
        };
        state = dispatch(state, msg, &runner);
    }

    grid_info!(
        "artgrid exiting with {} rows selected",
        state.selection().total_selected()
    );
    Ok(())
}

/// Runs one message through the controller, executes its effects and redraws
/// when the state changed.
fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        print!("{}", render(&state.view()));
        prompt();
    }
    state
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Closed);
    });
}
