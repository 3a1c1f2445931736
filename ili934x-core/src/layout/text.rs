//! Character-wrap and word-wrap text output

use core::iter;

use embedded_hal::digital::OutputPin;
use ili934x_hal::ScopedBus;

use super::Cursor;
use crate::display::Display;
use crate::error::Error;

impl<B, RST> Display<'_, B, RST>
where
    B: ScopedBus,
    RST: OutputPin,
{
    /// Write text at the cursor, wrapping on character boundaries
    ///
    /// Characters are collected into runs and each run is drawn in one
    /// window. A run ends at `'\n'` or when the next character would reach
    /// the right edge; either way the cursor moves to column 0 of the next
    /// line. The cursor is stored only after the whole string is drawn.
    pub fn write(&mut self, text: &str) -> Result<(), Error<B::Error>> {
        let font = self.font;
        let width = u32::from(self.config.width);
        let line_h = font.height();

        let mut x = self.cursor.x;
        let mut y = self.cursor.y;
        let mut run_start = 0;
        let mut run_width = 0u32;

        for (pos, ch) in text.char_indices() {
            if ch == '\n' {
                self.draw_glyphs(&text[run_start..pos], x, y)?;
                x = 0;
                y = self.next_line(y, line_h)?;
                run_start = pos + 1;
                run_width = 0;
                continue;
            }

            let char_w = u32::from(font.char_width(ch));
            if u32::from(x) + run_width + char_w >= width {
                self.draw_glyphs(&text[run_start..pos], x, y)?;
                x = 0;
                y = self.next_line(y, line_h)?;
                run_start = pos;
                run_width = char_w;
            } else {
                run_width += char_w;
            }
        }

        if run_start < text.len() {
            x = self.draw_glyphs(&text[run_start..], x, y)?;
        }

        self.cursor = Cursor { x, y };
        Ok(())
    }

    /// Print text at the cursor, wrapping on word boundaries
    ///
    /// The cursor column is the left margin for every line. Words are
    /// split on `' '` and drawn with a trailing space. A word that does not
    /// fit starts a new line; a word wider than the panel is hard-broken
    /// into pieces of `width / max_width` characters. Every line of input,
    /// including the last, ends with a new line. Only the cursor row is
    /// stored afterwards.
    pub fn print(&mut self, text: &str) -> Result<(), Error<B::Error>> {
        if text.is_empty() {
            return Ok(());
        }

        let font = self.font;
        let width = u32::from(self.config.width);
        let line_h = font.height();
        let margin = self.cursor.x;
        let piece_chars = (width / u32::from(font.max_width().max(1))).max(1) as usize;

        let mut x = margin;
        let mut y = self.cursor.y;

        for line in text.split('\n') {
            for word in line.split(' ') {
                let mut word = word;
                if u32::from(x) + font.str_width(word) >= width {
                    x = margin;
                    y = self.next_line(y, line_h)?;
                    while font.str_width(word) > width {
                        let split = word
                            .char_indices()
                            .nth(piece_chars)
                            .map_or(word.len(), |(at, _)| at);
                        let (piece, rest) = word.split_at(split);
                        self.draw_glyphs(piece, x, y)?;
                        word = rest;
                        y = self.next_line(y, line_h)?;
                    }
                }
                if !word.is_empty() {
                    x = self.draw_run(word.chars().chain(iter::once(' ')), x, y)?;
                }
            }
            x = margin;
            y = self.next_line(y, line_h)?;
        }

        self.cursor.y = y;
        Ok(())
    }
}
