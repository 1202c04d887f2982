//! Interactive command-line client for the relay server.
//!
//! Connects over WebSocket, registers a name, and turns simple
//! commands into protocol frames:
//!
//! ```text
//! /register alice          claim an identifier
//! /skip                    drop the current partner (paired mode)
//! /dm bob hello there      direct message (direct mode)
//! /users                   online roster (direct mode)
//! /history bob             stored conversation (direct mode)
//! anything else            relay to the current partner (paired mode)
//! ```

use std::env;

use futures::{SinkExt, StreamExt};
use relay_core::{ClientEvent, ServerEvent};
use relay_protocol::{decode_output, encode_input};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Where to connect: env override or default.
    let url =
        env::var("RELAY_CLIENT_URL").unwrap_or_else(|_| "ws://127.0.0.1:8080/ws".to_string());

    println!("Connecting to {}...", url);
    let (ws_stream, _) = connect_async(url.as_str()).await?;
    println!("Connected. Type /register <name> to start, /quit to leave.\n");

    let (mut write, mut read) = ws_stream.split();

    // Print everything the server pushes at us.
    tokio::spawn(async move {
        while let Some(Ok(msg)) = read.next().await {
            if let Message::Text(text) = msg {
                match decode_output(text.as_str()) {
                    Ok(event) => print_event(&event),
                    Err(err) => eprintln!("<< undecodable frame: {}", err),
                }
            }
        }
        println!("<< server closed the connection");
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("/quit") || line.eq_ignore_ascii_case("/exit") {
            println!("Exiting client.");
            break;
        }

        let event = match parse_command(line) {
            Some(event) => event,
            None => {
                eprintln!("Could not parse command. Try /register, /skip, /dm, /users, /history.");
                continue;
            }
        };

        let frame = encode_input(&event)?;
        write.send(Message::Text(frame.into())).await?;
    }

    Ok(())
}

fn parse_command(line: &str) -> Option<ClientEvent> {
    if !line.starts_with('/') {
        return Some(ClientEvent::Message {
            text: line.to_string(),
        });
    }

    let mut parts = line.splitn(3, ' ');
    let command = parts.next()?;

    match command {
        "/register" => Some(ClientEvent::Register {
            username: parts.next()?.to_string(),
        }),
        "/skip" => Some(ClientEvent::Skip),
        "/dm" => Some(ClientEvent::DirectMessage {
            recipient: parts.next()?.to_string(),
            message: parts.next()?.to_string(),
        }),
        "/users" => Some(ClientEvent::GetUsers),
        "/history" => Some(ClientEvent::GetConversation {
            with: parts.next()?.to_string(),
        }),
        _ => None,
    }
}

fn print_event(event: &ServerEvent) {
    match event {
        ServerEvent::Paired { partner } => println!("<< paired with {}", partner),
        ServerEvent::Skipped => println!("<< your partner skipped you; waiting again"),
        ServerEvent::PartnerLeft => println!("<< your partner left; waiting again"),
        ServerEvent::Message { from, text } => println!("[{}] {}", from, text),
        ServerEvent::Registered {
            username,
            online_users,
            total_users,
        } => println!(
            "<< registered as {} ({} online: {:?})",
            username, total_users, online_users
        ),
        ServerEvent::UserJoined {
            username,
            total_users,
        } => println!("<< {} joined ({} online)", username, total_users),
        ServerEvent::UserLeft {
            username,
            total_users,
        } => println!("<< {} left ({} online)", username, total_users),
        ServerEvent::UserList { users, total_users } => {
            println!("<< online ({}): {:?}", total_users, users)
        }
        ServerEvent::DirectMessage {
            from,
            message,
            timestamp,
        } => println!("[{} @ {}] {}", from, timestamp, message),
        ServerEvent::MessageSent { to, .. } => println!("<< delivered to {}", to),
        ServerEvent::ConversationHistory { with, history } => {
            println!("<< history with {} ({} messages):", with, history.len());
            for entry in history {
                println!("   [{} @ {}] {}", entry.sender, entry.timestamp, entry.message);
            }
        }
        ServerEvent::Error { message } => println!("<< error: {}", message),
    }
}
