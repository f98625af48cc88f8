//! WebSocket plumbing and the interactive client loop.

use anyhow::Context;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use punchline_client::Session;
use punchline_shared::{CardId, ClientMsg, ServerMsg};

use crate::args::CliArgs;
use crate::render;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Build the game websocket URL from a base string like "localhost:3000" or
/// "https://host". http(s) schemes map to ws(s); the path is forced to the
/// server's game endpoint.
pub fn build_ws_url(base: &str) -> anyhow::Result<Url> {
    // Bare "host:port" parses as an opaque URL with a scheme named after the
    // host; retry those with an http prefix.
    let mut url = match Url::parse(base) {
        Ok(u) if !u.cannot_be_a_base() => u,
        _ => Url::parse(&format!("http://{}", base))
            .with_context(|| format!("invalid server address '{base}'"))?,
    };

    match url.scheme() {
        "http" => url.set_scheme("ws").ok(),
        "https" => url.set_scheme("wss").ok(),
        "ws" | "wss" => Some(()),
        _ => None,
    }
    .ok_or_else(|| anyhow::anyhow!("Unsupported URL scheme: {}", url.scheme()))?;

    if url.path() != "/game" {
        url.set_path("/game");
    }
    Ok(url)
}

async fn send_msg(write: &mut WsSink, msg: &ClientMsg) -> anyhow::Result<()> {
    let txt = serde_json::to_string(msg)?;
    write.send(Message::Text(txt)).await?;
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

/// Connect and run the interactive loop until the connection closes or the
/// user quits. Inbound messages and stdin commands are serialized onto this
/// single task; each is handled to completion before the next.
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let ws_url = build_ws_url(&args.server)?;
    tracing::info!(url = %ws_url, "connecting");
    let (ws_stream, _resp) = tokio_tungstenite::connect_async(ws_url.as_str())
        .await
        .with_context(|| format!("connecting to {}", ws_url))?;
    let (mut write, mut read) = ws_stream.split();

    let mut session = Session::new();
    if let Some(name) = &args.name {
        session.seed_local_name(name.clone());
        let msg = session.build_profile_update(name);
        send_msg(&mut write, &msg).await?;
    }

    println!("connected to {ws_url} - type 'help' for commands");

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(txt))) => {
                    match serde_json::from_str::<ServerMsg>(&txt) {
                        Ok(msg) => {
                            let events = session.apply(msg);
                            render::report_events(&session, &events, &args.locale);
                        }
                        Err(e) => tracing::debug!(error = %e, "ignoring unparseable message"),
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    println!("disconnected");
                    break;
                }
                Some(Ok(_other)) => {}
                Some(Err(e)) => {
                    eprintln!("WebSocket error: {e}");
                    break;
                }
            },
            line = stdin.next_line() => match line? {
                Some(line) => {
                    match handle_command(line.trim(), &mut session, &mut write, &args).await? {
                        Flow::Continue => {}
                        Flow::Quit => break,
                    }
                }
                None => break,
            },
        }
    }

    Ok(())
}

async fn handle_command(
    line: &str,
    session: &mut Session,
    write: &mut WsSink,
    args: &CliArgs,
) -> anyhow::Result<Flow> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(c) => c,
        None => return Ok(Flow::Continue),
    };

    match command {
        "help" => render::print_help(),
        "status" => println!("{}", render::status_line(session)),
        "hand" => render::print_hand(session, &args.locale),
        "plays" => render::print_plays(session, &args.locale),
        "players" => render::print_roster(session),
        "toggle" => {
            let index: usize = match words.next().and_then(|w| w.parse().ok()) {
                Some(i) if i >= 1 => i,
                _ => {
                    println!("usage: toggle <number from 'hand'>");
                    return Ok(Flow::Continue);
                }
            };
            // Hand cards come first in the listing, blank slots after.
            let changed = if index <= session.hand.len() {
                let id: CardId = session.hand[index - 1].clone();
                session.toggle_card(id)
            } else {
                session.toggle_blank(index - session.hand.len() - 1)
            };
            if changed.is_some() {
                render::print_hand(session, &args.locale);
            } else {
                println!("cannot toggle entry {index}");
            }
        }
        "text" => {
            let index: usize = match words.next().and_then(|w| w.parse().ok()) {
                Some(i) if i >= 1 && i <= session.num_blanks => i,
                _ => {
                    println!("usage: text <blank number> <your text>");
                    return Ok(Flow::Continue);
                }
            };
            let text = words.collect::<Vec<_>>().join(" ");
            session.set_blank_text(index - 1, &text);
            render::print_hand(session, &args.locale);
        }
        "play" => {
            if !session.can_submit_play() {
                println!(
                    "selection must have exactly {} card(s)",
                    session.selection_capacity()
                );
                return Ok(Flow::Continue);
            }
            match session.build_play_submission() {
                Ok((msg, _event)) => {
                    send_msg(write, &msg).await?;
                    println!("play submitted");
                }
                Err(e) => println!("cannot submit: {e}"),
            }
        }
        "pick" => {
            let index: usize = match words.next().and_then(|w| w.parse().ok()) {
                Some(i) if i >= 1 => i,
                _ => {
                    println!("usage: pick <play number>");
                    return Ok(Flow::Continue);
                }
            };
            if session.select_play(index - 1).is_none() {
                println!("cannot pick play {index} right now");
                return Ok(Flow::Continue);
            }
            match session.build_judge_pick() {
                Ok(msg) => {
                    send_msg(write, &msg).await?;
                    println!("picked play {index}");
                }
                Err(e) => println!("cannot pick: {e}"),
            }
        }
        "name" => {
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                println!("usage: name <display name>");
                return Ok(Flow::Continue);
            }
            let msg = session.build_profile_update(&name);
            send_msg(write, &msg).await?;
            if let Some(event) = session.set_local_name(name, true) {
                render::report_events(session, &[event], &args.locale);
            }
        }
        "quit" | "exit" => return Ok(Flow::Quit),
        other => println!("unknown command '{other}' - type 'help'"),
    }

    Ok(Flow::Continue)
}
