//! Percent-encoding for prompts embedded in upstream paths and proxy URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except unreserved characters and `/` is escaped.
const PROMPT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

pub fn quote(input: &str) -> String {
    utf8_percent_encode(input, PROMPT).to_string()
}
