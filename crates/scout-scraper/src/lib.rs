pub mod badge;
pub mod client;
pub mod error;
pub mod extract;
pub mod html;
pub mod orchestrator;
pub mod pacer;
pub mod parse;
pub mod retry;
pub mod sink;

pub use badge::{match_badge, BadgeMatch};
pub use client::{search_url, FetchClient, USER_AGENTS};
pub use error::{FetchError, FetchErrorKind, SinkError};
pub use extract::ProductExtractor;
pub use html::{HtmlNode, Page};
pub use orchestrator::ScrapeOrchestrator;
pub use pacer::{DelaySpan, LivePacer, Pacer};
pub use parse::PageParser;
pub use sink::write_csv;
