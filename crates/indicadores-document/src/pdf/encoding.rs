// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsi text encoding for the builtin PDF fonts.
//
// printpdf declares its builtin fonts with `/WinAnsiEncoding` but writes the
// string operands of text-show operators as UTF-8, so every accented letter
// comes out as two wrong glyphs. After saving, each page's content stream is
// decoded with `lopdf`, the strings are re-encoded to WinAnsi, and the
// document is written again.
//
// Characters WinAnsi cannot represent get a short ASCII stand-in when one is
// common in formulas (`≤` becomes `<=`), and `?` otherwise.

use indicadores_core::error::IndicadoresError;
use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::{debug, warn};

/// Code points of WinAnsi bytes 0x80..=0x9F. Zero marks an unassigned byte.
const CP1252_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0, //
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// Text-show operators whose operands carry strings.
const TEXT_OPERATORS: [&str; 4] = ["Tj", "TJ", "'", "\""];

/// WinAnsi byte for a character, if the encoding has one.
fn win_ansi_byte(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        0x09 => Some(b' '),
        _ => CP1252_HIGH
            .iter()
            .position(|&mapped| mapped != 0 && u32::from(mapped) == cp)
            .map(|i| 0x80 + i as u8),
    }
}

/// ASCII stand-in for characters that often appear in indicator formulas.
fn fallback(c: char) -> &'static str {
    match c {
        '≤' => "<=",
        '≥' => ">=",
        '≠' => "!=",
        '≈' => "~",
        '−' => "-",
        '∑' | 'Σ' => "Sum",
        'Δ' | '∆' => "Delta",
        '√' => "sqrt",
        '∞' => "inf",
        '\u{2010}' | '\u{2011}' | '\u{2012}' => "-",
        '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{202F}' => " ",
        _ => "?",
    }
}

/// Encode text for a builtin font, returning the bytes and how many
/// characters had to be substituted.
pub fn to_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut substituted = 0;
    for c in text.chars() {
        match win_ansi_byte(c) {
            Some(b) => bytes.push(b),
            None => {
                substituted += 1;
                bytes.extend_from_slice(fallback(c).as_bytes());
            }
        }
    }
    (bytes, substituted)
}

/// Re-encode every text string in a saved PDF from UTF-8 to WinAnsi.
pub(crate) fn reencode_builtin_text(pdf: &[u8]) -> Result<Vec<u8>, IndicadoresError> {
    let mut document = Document::load_mem(pdf)
        .map_err(|e| IndicadoresError::PdfError(format!("failed to re-read PDF: {e}")))?;

    let mut substituted = 0;
    let page_ids: Vec<_> = document.get_pages().into_values().collect();
    for page_id in page_ids {
        let mut content = document
            .get_and_decode_page_content(page_id)
            .map_err(|e| IndicadoresError::PdfError(format!("unreadable page content: {e}")))?;
        substituted += reencode_content(&mut content);
        let encoded = content
            .encode()
            .map_err(|e| IndicadoresError::PdfError(format!("failed to encode page: {e}")))?;
        document
            .change_page_content(page_id, encoded)
            .map_err(|e| IndicadoresError::PdfError(format!("failed to replace page: {e}")))?;
    }

    if substituted > 0 {
        warn!(substituted, "characters outside WinAnsi were replaced");
    }

    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|e| IndicadoresError::PdfError(format!("failed to write PDF: {e}")))?;
    debug!(bytes = output.len(), "text re-encoded to WinAnsi");
    Ok(output)
}

fn reencode_content(content: &mut Content) -> usize {
    content
        .operations
        .iter_mut()
        .filter(|op| TEXT_OPERATORS.contains(&op.operator.as_str()))
        .flat_map(|op| op.operands.iter_mut())
        .map(reencode_object)
        .sum()
}

fn reencode_object(object: &mut Object) -> usize {
    match object {
        Object::String(bytes, _) => match std::str::from_utf8(bytes) {
            Ok(text) => {
                let (encoded, substituted) = to_win_ansi(text);
                *bytes = encoded;
                substituted
            }
            // Already single-byte.
            Err(_) => 0,
        },
        Object::Array(items) => items.iter_mut().map(reencode_object).sum(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;
    use lopdf::content::Operation;

    #[test]
    fn spanish_letters_map_to_latin1_bytes() {
        let (bytes, substituted) = to_win_ansi("Fórmula año Institución");
        assert_eq!(substituted, 0);
        assert_eq!(bytes[1], 0xF3);
        assert_eq!(bytes.len(), "Fórmula año Institución".chars().count());
    }

    #[test]
    fn punctuation_uses_the_cp1252_block() {
        let (bytes, _) = to_win_ansi("• – — € ·");
        assert_eq!(bytes, vec![0x95, b' ', 0x96, b' ', 0x97, b' ', 0x80, b' ', 0xB7]);
    }

    #[test]
    fn unsupported_characters_are_substituted() {
        let (bytes, substituted) = to_win_ansi("x ≤ 5 ∑ 漢");
        assert_eq!(substituted, 3);
        assert_eq!(bytes, b"x <= 5 Sum ?".to_vec());
    }

    #[test]
    fn strings_inside_tj_arrays_are_rewritten() {
        let mut content = Content {
            operations: vec![
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 10.into()]),
                Operation::new(
                    "TJ",
                    vec![Object::Array(vec![
                        Object::String("Año".as_bytes().to_vec(), StringFormat::Hexadecimal),
                        Object::Real(-120.0),
                    ])],
                ),
            ],
        };
        assert_eq!(reencode_content(&mut content), 0);
        let Object::Array(items) = &content.operations[1].operands[0] else {
            panic!("TJ operand should stay an array");
        };
        assert_eq!(items[0], Object::String(vec![b'A', 0xF1, b'o'], StringFormat::Hexadecimal));
        // Font operands are not text.
        assert_eq!(content.operations[0].operands[0], Object::Name(b"F1".to_vec()));
    }
}
