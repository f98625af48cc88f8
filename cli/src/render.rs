//! Terminal rendering of session state and events.

use owo_colors::OwoColorize;

use punchline_client::{Session, SessionEvent, Status};
use punchline_shared::{CardId, PlayerId};

pub fn print_help() {
    println!("commands:");
    println!("  status             show the current status line");
    println!("  hand               list hand cards and blank slots");
    println!("  toggle <n>         select/deselect entry n from 'hand'");
    println!("  text <n> <words>   set the text of blank slot n");
    println!("  play               submit the current selection");
    println!("  plays              list the plays on the table");
    println!("  pick <n>           judge: pick play n as the winner");
    println!("  players            show the scoreboard");
    println!("  name <words>       request a new display name");
    println!("  quit               leave the game");
}

fn card_text(session: &Session, id: &CardId, locale: &str) -> String {
    match session.catalog.resolve(id) {
        Some(card) => card.content_for(locale).to_string(),
        None => "???".dimmed().to_string(),
    }
}

fn player_name(session: &Session, id: PlayerId) -> String {
    session
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("P{id}"))
}

pub fn status_line(session: &Session) -> String {
    match session.status() {
        Status::WaitingForPlayers => "waiting for players...".to_string(),
        Status::Round(n) => {
            let mut line = format!("{} {}", "round".bold(), n);
            if let Some(judge) = session.judge_id {
                line.push_str(&format!(" - {} is the judge", player_name(session, judge)));
            }
            if session.is_waiting_on_player {
                line.push_str(" - your play is due");
            }
            line
        }
        Status::ChooseBestPlay => "you are the judge - choose the best play".bold().to_string(),
        Status::JudgeDeciding => "the judge is deciding...".to_string(),
        Status::YouWinRound => "you win the round!".green().bold().to_string(),
        Status::RoundWonBy(winner) => {
            format!("{} wins the round", player_name(session, winner).bold())
        }
        Status::NobodyWinsRound => "nobody wins the round".dimmed().to_string(),
        Status::GameOver => "game over".bold().to_string(),
    }
}

pub fn print_hand(session: &Session, locale: &str) {
    if let Some(black) = &session.current_black_card {
        println!(
            "{}: {} (pick {})",
            "prompt".bold(),
            black.content_for(locale),
            black.blanks
        );
    }

    let mut index = 1;
    for id in &session.hand {
        let badge = session
            .selection
            .position(&punchline_client::SelectionEntry::Card(id.clone()))
            .map(|p| format!("[{p}]"))
            .unwrap_or_else(|| "   ".to_string());
        println!("{:>3} {} {}", index, badge.green(), card_text(session, id, locale));
        index += 1;
    }
    for blank in 0..session.num_blanks {
        let badge = session
            .selection
            .position(&punchline_client::SelectionEntry::Blank(blank))
            .map(|p| format!("[{p}]"))
            .unwrap_or_else(|| "   ".to_string());
        let text = &session.blank_texts[blank];
        let shown = if text.is_empty() {
            "(blank - set with 'text')".dimmed().to_string()
        } else {
            text.clone()
        };
        println!("{:>3} {} {}", index, badge.green(), shown);
        index += 1;
    }
    println!(
        "selected {}/{}",
        session.selection.len(),
        session.selection_capacity()
    );
}

pub fn print_plays(session: &Session, locale: &str) {
    let plays = session.visible_plays();
    if plays.is_empty() {
        println!("nothing on the table");
        return;
    }
    for (i, play) in plays.iter().enumerate() {
        let texts: Vec<String> = play.iter().map(|id| card_text(session, id, locale)).collect();
        let marker = if session.selected_play == Some(i) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {:>2}. {}", marker, i + 1, texts.join(" / "));
    }
}

pub fn print_roster(session: &Session) {
    for entry in session.roster_entries() {
        let mut flags = String::new();
        if entry.is_judge {
            flags.push_str(" [judge]");
        }
        if entry.is_you {
            flags.push_str(" [you]");
        }
        if entry.is_pending {
            flags.push_str(" [thinking]");
        }
        println!(
            "{:>4}  {}{}",
            entry.player.score,
            entry.player.name.bold(),
            flags.dimmed()
        );
    }
}

fn print_game_end(session: &Session, locale: &str) {
    println!("{}", "=== final scores ===".bold());
    for entry in session.roster_entries() {
        let trophies = session.trophies_for(entry.player.id).len();
        let winner = if session.is_winner(entry.player.id) {
            " 🏆".to_string()
        } else {
            String::new()
        };
        println!(
            "{:>4}  {}{} ({} trophies)",
            entry.player.score,
            entry.player.name.bold(),
            winner,
            trophies
        );
    }
    for trophy in session.local_trophies() {
        println!(
            "you earned: {} - {}",
            trophy.name.get(locale).bold(),
            trophy.desc.get(locale)
        );
    }
}

/// React to the events one inbound message produced.
pub fn report_events(session: &Session, events: &[SessionEvent], locale: &str) {
    for event in events {
        match event {
            SessionEvent::RoundChanged | SessionEvent::StageChanged(_) => {
                println!("{}", status_line(session));
                if matches!(event, SessionEvent::StageChanged(punchline_shared::Stage::Playing))
                    && session.is_waiting_on_player
                {
                    print_hand(session, locale);
                }
                if matches!(event, SessionEvent::StageChanged(punchline_shared::Stage::Judging)) {
                    print_plays(session, locale);
                }
                if matches!(event, SessionEvent::StageChanged(punchline_shared::Stage::GameEnd)) {
                    print_game_end(session, locale);
                }
            }
            SessionEvent::ScoreChanged => println!("score: {}", session.score),
            SessionEvent::PlayedCardsChanged => {
                let texts: Vec<String> = session
                    .played_cards
                    .iter()
                    .map(|id| card_text(session, id, locale))
                    .collect();
                println!("your play: {}", texts.join(" / "));
            }
            SessionEvent::Rejected => {
                println!(
                    "{}: {} ({})",
                    "rejected".red().bold(),
                    session.last_reject_reason,
                    session.last_reject_desc
                );
            }
            SessionEvent::NameChanged { .. } => {
                println!("you are known as {}", session.local_player_name.bold());
            }
            SessionEvent::RosterChanged
            | SessionEvent::SelectionChanged
            | SessionEvent::JudgePickChanged => {}
        }
    }
}
