//! CLI channel — interactive terminal conversation.
//!
//! Reads utterances from stdin, writes replies to stdout.
//! Used for `lunchline chat`.

use async_trait::async_trait;
use lunchline_core::channel::{Channel, ChannelId, ChannelMessage};
use lunchline_core::error::ChannelError;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

/// Conversation ID used for every terminal utterance.
pub const CLI_CHAT_ID: &str = "cli_session";

/// Interactive CLI channel for terminal conversations.
pub struct CliChannel {
    id: ChannelId,
}

impl CliChannel {
    pub fn new() -> Self {
        Self {
            id: ChannelId("cli".into()),
        }
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a line asks to leave the terminal session.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);
        let channel_id = self.id.clone();

        tokio::spawn(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }
                        if is_exit_command(&line) {
                            break;
                        }

                        let msg = ChannelMessage {
                            channel_id: channel_id.clone(),
                            content: line,
                            chat_id: CLI_CHAT_ID.into(),
                        };

                        if tx.send(Ok(msg)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx.send(Err(ChannelError::ConnectionLost(e.to_string()))).await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, _chat_id: &str, content: &str) -> Result<(), ChannelError> {
        let mut stdout = io::stdout();
        stdout
            .write_all(format!("{content}\n").as_bytes())
            .await
            .map_err(|e| ChannelError::ConnectionLost(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| ChannelError::ConnectionLost(e.to_string()))
    }
}
