use crate::core::message::{Message, Role};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Plain-text transcript of the conversation, appended as messages arrive.
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = &log_file {
            Self::test_file_access(path)?;
        }

        Ok(LoggingState {
            is_active: log_file.is_some(),
            file_path: log_file,
        })
    }

    /// Append a message to the transcript. Error messages are not written.
    pub fn log_chat_message(&self, message: &Message) -> Result<(), Box<dyn std::error::Error>> {
        match message.role() {
            Role::User => self.log_message(&format!("You: {}", message.text())),
            Role::Bot => {
                let mut content = message.text().trim_end().to_string();
                if let Some(chart) = message.chart() {
                    if !content.is_empty() {
                        content.push('\n');
                    }
                    content.push_str(&format!("## chart: {}", chart.summary()));
                }
                if content.is_empty() {
                    return Ok(());
                }
                self.log_message(&content)
            }
            Role::Error => Ok(()),
        }
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        match (&self.file_path, self.is_active) {
            (Some(path), true) => Self::write_to_log(path, content),
            _ => Ok(()),
        }
    }

    fn write_to_log(file_path: &str, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Blank line between messages, as on screen
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            _ => "disabled".to_string(),
        }
    }

    fn test_file_access(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}
