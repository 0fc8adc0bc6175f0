pub mod aggregate;
pub mod catalog;
pub mod cheatslips;
pub mod client;
pub mod credentials;
pub mod error;
pub mod log;
pub mod page;
pub mod resolve;

pub use aggregate::aggregate_title;
pub use catalog::Catalog;
pub use cheatslips::{CheatSlipsClient, SecondarySource, parse_cheat_content};
pub use client::{Endpoints, HttpClient};
pub use credentials::{
    CredentialSource, TOKEN_ENV, config_path, credential_source, load_token, save_to_file,
};
pub use error::ScrapeError;
pub use log::{HarvestLog, LogEntry, LogSummary};
pub use page::{BuildRow, CheatRow, DetailPage, DetailSource, TinfoilSite, parse_detail_page};
pub use resolve::{
    BuildPair, ChooseAll, Chooser, Resolution, Selection, WorkItem, parse_build_pairs,
    parse_id_list, resolve,
};
