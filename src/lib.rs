pub mod agenda;
pub mod board;
pub mod builder;
pub mod classify;
pub mod config;
pub mod display;
pub mod feed;
pub mod lockers;
pub mod models;
pub mod parsing;
pub mod refresher;
pub mod ticker;

pub use board::{snapshot_from_rows, BoardItem, BoardSnapshot, BoardView};
pub use builder::build_events;
pub use classify::classify;
pub use config::{BoardConfig, ConfigError, ConfigStore, FeedFormat};
pub use feed::FeedError;
pub use lockers::expand_lockers;
pub use models::{Event, Layout, LockerEntry, LockerText, SectionKind, Sections};
pub use parsing::csv::parse_csv;
pub use parsing::{clean_team_name, extract_locker, extract_rink, parse_event_description};
pub use refresher::BoardRefresher;
pub use ticker::Ticker;
