use crate::domain::model::{DisplayDocument, ReplyMessage};
use crate::domain::ports::ReplyChannel;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Prints replies to stdout, for running commands from a terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }

    pub fn render(document: &DisplayDocument) -> String {
        let mut out = format!("== {} ==\n", document.title);
        for field in &document.fields {
            out.push_str(&field.name);
            out.push('\n');
            for line in field.value.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

#[async_trait]
impl ReplyChannel for ConsoleChannel {
    async fn defer(&self) -> Result<()> {
        println!("⏳ Working on it...");
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }

    async fn follow_up(&self, message: ReplyMessage) -> Result<()> {
        match message {
            ReplyMessage::Text(text) => println!("{}", text),
            ReplyMessage::Embed(document) => print!("{}", Self::render(&document)),
        }
        Ok(())
    }
}
