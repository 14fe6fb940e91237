//! Loose parsing of oracle replies into catalog indices.
//!
//! The oracle is asked for a list of transient indices but replies in
//! free text; nothing about the format is trusted. This parse scans for
//! every integer substring regardless of surrounding text, deduplicates
//! them as a set, drops out-of-range indices, and truncates to the
//! result bound in ascending order so output is reproducible. Isolated
//! here so a structured oracle output format could replace it without
//! touching callers.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"\d+").unwrap();
}

/// Result of loose-parsing an oracle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedIds {
    /// In-range indices, ascending, at most `limit`. May be empty when
    /// every integer in the reply was out of range.
    Found(Vec<usize>),
    /// The reply contained no integer substrings at all.
    NoneFound,
}

/// Scan `reply` for catalog indices valid against a catalog of
/// `catalog_len` entries, keeping at most `limit`.
pub fn parse_reply_ids(reply: &str, catalog_len: usize, limit: usize) -> ParsedIds {
    let mut found_any = false;
    let mut ids: BTreeSet<usize> = BTreeSet::new();

    for m in INTEGER.find_iter(reply) {
        found_any = true;
        if let Ok(id) = m.as_str().parse::<usize>() {
            if id < catalog_len {
                ids.insert(id);
            }
        }
    }

    if !found_any {
        return ParsedIds::NoneFound;
    }

    ParsedIds::Found(ids.into_iter().take(limit).collect())
}
