use crowdmines_core::{ChatEvent, Coord2, GuessKind, parse_guess};

/// One line typed into the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Chat(ChatEvent),
    /// A click on the local screen, addressed by tile label.
    Click { kind: GuessKind, coords: Coord2 },
    Show,
    Quit,
}

/// Reads one line.
///
/// - `{...}` is a chat event as the transport delivers it, in JSON;
/// - `name: text` is chat from `name`, `@name: text` the same from a moderator;
/// - `/click A3` and `/flag A3` are local clicks, `/show` reprints, `/quit` stops;
/// - anything else is the local entry field, sent as the moderated local user.
pub fn parse_line(line: &str, size: u8) -> Option<Input> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    if line.trim_start().starts_with('{') {
        return match serde_json::from_str(line) {
            Ok(event) => Some(Input::Chat(event)),
            Err(err) => {
                log::warn!("Malformed chat event: {}", err);
                None
            }
        };
    }

    if let Some(command) = line.strip_prefix('/') {
        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        return match name {
            "show" => Some(Input::Show),
            "quit" | "exit" => Some(Input::Quit),
            "click" | "flag" => {
                let kind = if name == "flag" {
                    GuessKind::Flag
                } else {
                    GuessKind::Check
                };
                let coords = parse_guess(arg).and_then(|guess| guess.coords(size));
                if coords.is_none() {
                    log::warn!("No tile {:?} on a {}x{} board", arg, size, size);
                }
                coords.map(|coords| Input::Click { kind, coords })
            }
            _ => {
                log::warn!("Unknown command /{}", name);
                None
            }
        };
    }

    if let Some((name, message)) = line.split_once(':') {
        let name = name.trim();
        if !name.is_empty() && !name.contains(char::is_whitespace) {
            let (name, is_moderator) = match name.strip_prefix('@') {
                Some(name) => (name, true),
                None => (name, false),
            };
            return Some(Input::Chat(
                ChatEvent::new(name, message).moderator(is_moderator),
            ));
        }
    }

    Some(Input::Chat(ChatEvent::local(line)))
}
