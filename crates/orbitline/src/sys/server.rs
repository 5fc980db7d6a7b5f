use crate::events::AppEvent;
use async_channel::Sender;
use orbitline_core::{Frame, ItemId};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

/// Latest assembled frame, published by the engine loop after every
/// transition and read here to answer `frame` queries.
pub type FrameSnapshot = Arc<RwLock<Frame>>;

#[derive(Debug, Clone)]
pub enum Command {
    Event(AppEvent),
    Frame,
}

/// Parses one line of the control protocol:
/// `select <id>` | `clear` | `resize <w> <h>` | `frame`.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "select" => {
            let id: u32 = parts.next()?.parse().ok()?;
            Some(Command::Event(AppEvent::Select(ItemId::new(id))))
        }
        "clear" => Some(Command::Event(AppEvent::ClearSelection)),
        "resize" => {
            let width: f64 = parts.next()?.parse().ok()?;
            let height: f64 = parts.next()?.parse().ok()?;
            Some(Command::Event(AppEvent::Resize(width, height)))
        }
        "frame" => Some(Command::Frame),
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>, snapshot: FrameSnapshot, socket_path: PathBuf) {
    // Cleanup old socket if it exists
    if std::fs::metadata(&socket_path).is_ok() {
        let _ = std::fs::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Control socket listening at {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                let snapshot = snapshot.clone();
                tokio::spawn(async move {
                    let (read_half, mut write_half) = stream.split();
                    let reader = BufReader::new(read_half);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(line.trim()) {
                            Some(Command::Event(event)) => {
                                if tx.send(event).await.is_err() {
                                    return;
                                }
                            }
                            Some(Command::Frame) => {
                                // serialize outside the lock's scope so no
                                // guard is held across the write await
                                let json = {
                                    let frame = snapshot.read();
                                    serde_json::to_string(&*frame)
                                };
                                match json {
                                    Ok(json) => {
                                        if write_half
                                            .write_all(format!("{json}\n").as_bytes())
                                            .await
                                            .is_err()
                                        {
                                            return;
                                        }
                                    }
                                    Err(e) => log::error!("Failed to serialize frame: {}", e),
                                }
                            }
                            None => {
                                if !line.trim().is_empty() {
                                    log::debug!("Ignoring malformed command: {:?}", line);
                                }
                            }
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            parse_command("select 3"),
            Some(Command::Event(AppEvent::Select(id))) if id == ItemId::new(3)
        ));
        assert!(matches!(
            parse_command("clear"),
            Some(Command::Event(AppEvent::ClearSelection))
        ));
        assert!(matches!(
            parse_command("resize 800 600"),
            Some(Command::Event(AppEvent::Resize(w, h))) if w == 800.0 && h == 600.0
        ));
        assert!(matches!(parse_command("frame"), Some(Command::Frame)));
        assert!(matches!(
            parse_command("  resize 1024.5 768.25  "),
            Some(Command::Event(AppEvent::Resize(_, _)))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_command("").is_none());
        assert!(parse_command("select").is_none());
        assert!(parse_command("select banana").is_none());
        assert!(parse_command("resize 800").is_none());
        assert!(parse_command("resize a b").is_none());
        assert!(parse_command("launch 1").is_none());
    }
}
