use crate::{
    entities::{Field, TravelMode},
    error::{invalid_input_error, Error},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Submit(Field, String),
    Suggest(Field, String),
    Pick(Field, usize),
    Locate,
    Mode(TravelMode),
    Modes,
    Route,
    Show,
    Clear,
    Help,
    Quit,
}

pub const USAGE: &str = "\
commands:
  start <address>          set the start by geocoding an address
  stop <address>           append a stop by geocoding an address
  suggest start|stop <q>   list candidates for a query (3+ characters)
  pick start|stop <n>      use the n-th listed candidate
  locate                   use the current position as the start
  mode <travel-mode>       change the travel mode
  modes                    list travel modes
  route                    fetch the route again
  show                     print waypoints and the route summary
  clear                    reset everything
  help                     print this text
  quit                     exit";

fn parse_field(word: &str) -> Result<Field, Error> {
    match word {
        "start" => Ok(Field::Start),
        "stop" => Ok(Field::Stop),
        _ => Err(invalid_input_error()),
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, Error> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("start", address) if !address.is_empty() => Command::Submit(Field::Start, address.into()),
        ("stop", address) if !address.is_empty() => Command::Submit(Field::Stop, address.into()),
        ("suggest", args) => {
            let (field, query) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            Command::Suggest(parse_field(field)?, query.trim().into())
        }
        ("pick", args) => {
            let (field, index) = args
                .split_once(char::is_whitespace)
                .ok_or_else(invalid_input_error)?;
            let index: usize = index.trim().parse().map_err(|_| invalid_input_error())?;

            if index == 0 {
                return Err(invalid_input_error());
            }

            Command::Pick(parse_field(field)?, index - 1)
        }
        ("locate", "") => Command::Locate,
        ("mode", mode) => Command::Mode(mode.parse()?),
        ("modes", "") => Command::Modes,
        ("route", "") => Command::Route,
        ("show", "") => Command::Show,
        ("clear", "") => Command::Clear,
        ("help", _) => Command::Help,
        ("quit", "") | ("exit", "") => Command::Quit,
        _ => return Err(invalid_input_error()),
    };

    Ok(Some(command))
}
