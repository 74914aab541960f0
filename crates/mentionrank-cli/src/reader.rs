//! Newline-delimited JSON tweet reader.
//!
//! Each non-blank line is one tweet object. Only two fields are used:
//!
//! ```json
//! {"user": {"screen_name": "alice"},
//!  "entities": {"user_mentions": [{"screen_name": "bob"}, {"screen_name": "carol"}]}}
//! ```
//!
//! The author is `user.screen_name`; the mentions are
//! `entities.user_mentions[*].screen_name` in order. Every other field is
//! ignored. A tweet without `entities` or `user_mentions` has no mentions.
//!
//! [`TweetReader`] is a lazy iterator, so the graph builder pulls one record
//! at a time and the raw input is never held in memory as a whole.

use std::io::{self, BufRead};

use serde::Deserialize;

use mentionrank_core::error::ErrorCode;
use mentionrank_core::graph::MentionRecord;

/// Failure reading or decoding one input line.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read input at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("input line {line} is not valid UTF-8")]
    InvalidUtf8 {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("invalid tweet JSON at line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ReadError {
    /// Machine-readable code for this error.
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::InputReadError,
            Self::InvalidUtf8 { .. } | Self::Decode { .. } => ErrorCode::InputDecodeError,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Tweet {
    user: TweetUser,
    #[serde(default)]
    entities: TweetEntities,
}

#[derive(Debug, Deserialize)]
struct TweetUser {
    screen_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct TweetEntities {
    #[serde(default)]
    user_mentions: Vec<UserMention>,
}

#[derive(Debug, Deserialize)]
struct UserMention {
    screen_name: String,
}

impl From<Tweet> for MentionRecord {
    fn from(tweet: Tweet) -> Self {
        Self {
            author: tweet.user.screen_name,
            mentions: tweet
                .entities
                .user_mentions
                .into_iter()
                .map(|m| m.screen_name)
                .collect(),
        }
    }
}

/// Lazy iterator of [`MentionRecord`]s over a line-oriented tweet stream.
pub struct TweetReader<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> TweetReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for TweetReader<R> {
    type Item = Result<MentionRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line += 1;
            let line = self.line;

            let text = match raw {
                Ok(text) => text,
                // `Lines` reports undecodable bytes as `InvalidData`.
                Err(source) if source.kind() == io::ErrorKind::InvalidData => {
                    return Some(Err(ReadError::InvalidUtf8 { line, source }));
                }
                Err(source) => return Some(Err(ReadError::Io { line, source })),
            };
            if text.trim().is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str::<Tweet>(&text)
                    .map(MentionRecord::from)
                    .map_err(|source| ReadError::Decode { line, source }),
            );
        }
    }
}
