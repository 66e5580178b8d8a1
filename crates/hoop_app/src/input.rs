use std::io::{self, BufRead};
use std::sync::mpsc;

use hoop_core::{CreativeField, Mode, Msg};

use crate::app::Input;

/// Reads stdin line by line until EOF or the pump hangs up.
pub fn read_commands(tx: mpsc::Sender<Input>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match parse_command(&line) {
            Some(input) => {
                if tx.send(input).is_err() {
                    break;
                }
            }
            None => {
                if !line.trim().is_empty() {
                    println!("Comando no reconocido. Escribe 'help'.");
                }
            }
        }
    }
    let _ = tx.send(Input::Quit);
}

fn parse_command(line: &str) -> Option<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (trimmed, ""),
    };

    let msg = match cmd {
        "mode" => match rest {
            "collector" => Msg::ModeSelected(Mode::Collector),
            "creative" => Msg::ModeSelected(Mode::Creative),
            _ => return None,
        },
        // Space-separated on the command line, newline-separated in the
        // core, matching the multi-line input box it models.
        "links" => Msg::LinksChanged(rest.split_whitespace().collect::<Vec<_>>().join("\n")),
        "window" if !rest.is_empty() => Msg::WindowChanged(rest.to_string()),
        "num" => Msg::NumScriptsChanged(rest.parse().ok()?),
        "sort" => {
            let mut parts = rest.split_whitespace();
            let sort_by = parts.next()?.to_string();
            let order = parts.next().unwrap_or("desc").to_string();
            Msg::SortChanged { sort_by, order }
        }
        "niche" => Msg::CreativeChanged(CreativeField::NichePrompt, rest.to_string()),
        "rules" => Msg::CreativeChanged(CreativeField::RulesPrompt, rest.to_string()),
        "level" => Msg::CreativeChanged(CreativeField::AdaptationLevel, rest.to_string()),
        "source" => Msg::CreativeChanged(CreativeField::RulesSource, rest.to_string()),
        "customrules" => Msg::CreativeChanged(CreativeField::CustomRules, rest.to_string()),
        "lang" => Msg::CreativeChanged(CreativeField::Lang, rest.to_string()),
        "run" => Msg::JobSubmitted,
        // Empty urls and prompts are validated by the core, not here.
        "single" => Msg::TranscribeSubmitted(rest.to_string()),
        "consent" => Msg::ConsentAccepted,
        "refine" => {
            let (id, prompt) = match rest.split_once(char::is_whitespace) {
                Some((id, prompt)) => (id, prompt.trim()),
                None => (rest, ""),
            };
            Msg::RefineSubmitted {
                card_id: id.parse().ok()?,
                prompt: prompt.to_string(),
            }
        }
        "back" => Msg::RevisionBack {
            card_id: rest.parse().ok()?,
        },
        "fwd" => Msg::RevisionForward {
            card_id: rest.parse().ok()?,
        },
        "clear" => Msg::ClearClicked,
        "copy" => {
            return Some(Input::Copy {
                card_id: rest.parse().ok()?,
            })
        }
        "help" => return Some(Input::Help),
        "quit" | "exit" => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Core(msg))
}
