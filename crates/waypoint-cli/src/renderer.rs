//! Terminal rendering for markdown output.
//!
//! Headers keep their hash marks and are colored directly; everything else
//! goes through termimad so tables and emphasis render properly. With color
//! disabled the markdown is printed unchanged.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        let mut block = String::new();
        for line in markdown.lines() {
            if line.starts_with('#') {
                self.flush(&mut block);
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                block.push_str(line);
                block.push('\n');
            }
        }
        self.flush(&mut block);
        Ok(())
    }

    /// Prints and clears a run of non-header lines.
    fn flush(&self, block: &mut String) {
        if !block.is_empty() {
            self.skin.print_text(block.as_str());
            block.clear();
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Title\n\n- item\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
