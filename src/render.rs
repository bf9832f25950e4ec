//! Serialization of a [`GlyphGrid`] into a displayable token stream.

use std::fmt;

use serde::Serialize;

use crate::glyph::GlyphGrid;

/// One display unit of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Token {
    Glyph(char),
    RowBreak,
}

/// Row-major glyph tokens with a [`Token::RowBreak`] between rows.
///
/// There is no trailing break, so a `w x h` grid yields `w * h` glyphs and
/// `h - 1` breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGrid {
    width: usize,
    height: usize,
    tokens: Vec<Token>,
}

impl RenderedGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Glyph(c) => Some(*c),
            Token::RowBreak => None,
        })
    }

    /// Plain text, rows separated by `\n`.
    pub fn to_text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Glyph(c) => *c,
                Token::RowBreak => '\n',
            })
            .collect()
    }

    /// HTML fragment: one `<span>` per glyph, `<br>` between rows.
    ///
    /// Glyphs are escaped and spaces become `&nbsp;` so every cell keeps its
    /// width under any `white-space` setting.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.tokens.len() * 14);
        for token in &self.tokens {
            match token {
                Token::Glyph(c) => {
                    html.push_str("<span>");
                    push_escaped(&mut html, *c);
                    html.push_str("</span>");
                }
                Token::RowBreak => html.push_str("<br>"),
            }
        }
        html
    }
}

impl fmt::Display for RenderedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        ' ' => out.push_str("&nbsp;"),
        c => out.push(c),
    }
}

/// Serialize a glyph grid row by row.
pub fn render(grid: &GlyphGrid) -> RenderedGrid {
    let mut tokens = Vec::with_capacity(grid.width() * grid.height() + grid.height());
    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            tokens.push(Token::RowBreak);
        }
        tokens.extend(row.iter().copied().map(Token::Glyph));
    }
    RenderedGrid {
        width: grid.width(),
        height: grid.height(),
        tokens,
    }
}
