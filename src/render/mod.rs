//! Renderer for the legacy two-character color/style markup.
//!
//! Server responses carry `§`-prefixed codes from the legacy 4-bit
//! palette (`§c` = red, `§l` = bold, ...). [`render`] translates them
//! into ANSI escape sequences for terminal output; [`strip`] removes
//! them for output that is not a terminal.

mod token;

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::Command;

use token::{tokens, Token};

/// The legacy 4-bit palette, keyed by code character, as 24-bit
/// foreground colors.
const COLORS: [(char, Color); 16] = [
    ('0', Color::Rgb { r: 0x00, g: 0x00, b: 0x00 }),
    ('1', Color::Rgb { r: 0x00, g: 0x00, b: 0xAA }),
    ('2', Color::Rgb { r: 0x00, g: 0xAA, b: 0x00 }),
    ('3', Color::Rgb { r: 0x00, g: 0xAA, b: 0xAA }),
    ('4', Color::Rgb { r: 0xAA, g: 0x00, b: 0x00 }),
    ('5', Color::Rgb { r: 0xAA, g: 0x00, b: 0xAA }),
    ('6', Color::Rgb { r: 0xFF, g: 0xAA, b: 0x00 }),
    ('7', Color::Rgb { r: 0xAA, g: 0xAA, b: 0xAA }),
    ('8', Color::Rgb { r: 0x55, g: 0x55, b: 0x55 }),
    ('9', Color::Rgb { r: 0x55, g: 0x55, b: 0xFF }),
    ('a', Color::Rgb { r: 0x55, g: 0xFF, b: 0x55 }),
    ('b', Color::Rgb { r: 0x55, g: 0xFF, b: 0xFF }),
    ('c', Color::Rgb { r: 0xFF, g: 0x55, b: 0x55 }),
    ('d', Color::Rgb { r: 0xFF, g: 0x55, b: 0xFF }),
    ('e', Color::Rgb { r: 0xFF, g: 0xFF, b: 0x55 }),
    ('f', Color::Rgb { r: 0xFF, g: 0xFF, b: 0xFF }),
];

/// Style codes that are not colors. `r` clears color and attributes.
const ATTRIBUTES: [(char, Attribute); 6] = [
    ('k', Attribute::RapidBlink),
    ('l', Attribute::Bold),
    ('m', Attribute::CrossedOut),
    ('n', Attribute::Underlined),
    ('o', Attribute::Italic),
    ('r', Attribute::Reset),
];

fn color_for(code: char) -> Option<Color> {
    COLORS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, color)| *color)
}

fn attribute_for(code: char) -> Option<Attribute> {
    ATTRIBUTES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, attribute)| *attribute)
}

/// Append a command's ANSI sequence to the buffer.
fn emit(buffer: &mut String, command: impl Command) {
    // Writing into a String cannot fail.
    let _ = command.write_ansi(buffer);
}

/// Translate legacy markup into ANSI escape sequences.
///
/// Ordinary characters are copied through verbatim. A directive
/// switches the foreground color and/or applies an attribute to
/// everything that follows. A code may match the color table, the
/// attribute table, both, or neither; the tables are consulted
/// independently and an unmatched code is silently dropped, as is an
/// unpaired marker at the end of the input. The output always ends
/// with a full style reset. Never fails, whatever the input.
pub fn render(input: &str) -> String {
    let mut buffer = String::with_capacity(input.len());

    for token in tokens(input) {
        match token {
            Token::Literal(ch) => buffer.push(ch),
            Token::Directive(code) => {
                if let Some(color) = color_for(code) {
                    emit(&mut buffer, SetForegroundColor(color));
                }
                if let Some(attribute) = attribute_for(code) {
                    emit(&mut buffer, SetAttribute(attribute));
                }
            }
        }
    }

    emit(&mut buffer, SetAttribute(Attribute::Reset));
    buffer
}

/// Remove legacy markup without emitting any styling.
///
/// Keeps literal characters only; directives, unknown codes and an
/// unpaired trailing marker all disappear.
pub fn strip(input: &str) -> String {
    tokens(input)
        .filter_map(|token| match token {
            Token::Literal(ch) => Some(ch),
            Token::Directive(_) => None,
        })
        .collect()
}
