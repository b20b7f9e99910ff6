mod commands;
mod view;

pub use commands::{parse, Command, USAGE};

use async_channel::Receiver;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::{
    engine::{Event, Session, Update},
    entities::Field,
    error::Error,
};

/// Runs the terminal control surface until `quit` or end of input.
pub async fn serve(mut session: Session, events: Receiver<Event>) -> Result<(), Error> {
    let mut lines = BufReader::new(io::stdin()).lines();

    println!("{}", USAGE);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                match parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => handle(&mut session, command).await,
                    Ok(None) => {}
                    Err(err) => {
                        println!("{}", err.message);
                        println!("type `help` for the list of commands");
                    }
                }

                for notice in session.take_notices() {
                    println!("! {}", notice);
                }
            }
            event = events.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(_) => break,
                };

                match session.apply(event) {
                    Some(Update::Route) => {
                        println!("{}", view::summary(session.route(), session.travel_mode()));
                    }
                    Some(Update::Suggestions(field)) => {
                        println!("{}", view::suggestions(field, session.suggestions(field).items()));
                    }
                    None => {}
                }
            }
        }
    }

    tracing::info!("control surface closed");
    Ok(())
}

#[tracing::instrument(skip(session))]
async fn handle(session: &mut Session, command: Command) {
    match command {
        Command::Submit(field, text) => {
            if let Some(waypoint) = session.submit(field, &text).await {
                println!("{}: {}", field.name(), waypoint.full_address);
            }
        }
        Command::Suggest(field, query) => {
            if !session.suggest(field, &query) {
                println!("{}", view::suggestions(field, &[]));
            }
        }
        Command::Pick(field, index) => {
            if let Some(waypoint) = session.select_suggestion(field, index) {
                println!("{}: {}", field.name(), waypoint.full_address);
            }
        }
        Command::Locate => {
            if let Some(waypoint) = session.locate().await {
                println!("{}: {}", Field::Start.name(), waypoint.full_address);
            }
        }
        Command::Mode(mode) => {
            if !session.set_travel_mode(mode) {
                println!("already using {}", mode.label());
            } else if !session.is_routable() {
                println!("{}", view::summary(None, mode));
            }
        }
        Command::Modes => println!("{}", view::modes(session.travel_mode())),
        Command::Route => {
            session.refresh();

            if !session.is_routable() {
                println!("{}", view::summary(None, session.travel_mode()));
            }
        }
        Command::Show => println!("{}", view::session(session)),
        Command::Clear => {
            session.clear_all();
            println!("cleared");
            println!("{}", view::summary(None, session.travel_mode()));
        }
        Command::Help => println!("{}", USAGE),
        Command::Quit => {}
    }
}
