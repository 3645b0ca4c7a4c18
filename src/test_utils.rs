//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される言語ディレクトリのフィクスチャを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use tempfile::TempDir;

/// 一時ディレクトリ上の言語ルート (`lang/` 相当)
pub(crate) struct LangDir {
    /// Drop 時に削除される
    temp_dir: TempDir,
}

impl LangDir {
    pub(crate) fn new() -> Self {
        Self { temp_dir: TempDir::new().unwrap() }
    }

    pub(crate) fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// ルートからの相対パスを絶対パスにする
    pub(crate) fn join(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// ファイルを作成する (親ディレクトリも作成)
    ///
    /// # Arguments
    /// * `relative` - ルートからの相対パス（例: "en/auth.php"）
    /// * `contents` - ファイルの内容
    pub(crate) fn write(&self, relative: &str, contents: &str) {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative)).unwrap()
    }

    pub(crate) fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }
}
