//! language-sync
//!
//! Laravel 形式の翻訳ファイル (`lang/{lang}.json` と `lang/{lang}/*.php`) を
//! ソース言語に合わせて同期する CLI のライブラリ部分

pub mod cli;
pub mod codec;
pub mod config;
pub mod diff;
pub mod keys;
pub mod merge;
pub mod sync;
pub mod types;

#[cfg(test)]
mod test_utils;
