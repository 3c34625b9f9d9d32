//! Error classification and its exit codes

/// ショップ全体のエラー分類
///
/// 終了コードは BSD `sysexits.h` の値を使う。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.exit_code(), 77);
/// assert_eq!(ErrorKind::DataAccess.to_string(), "Data Access");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力が形式を満たさない (EX_DATAERR)
    Validation,
    /// トークンが無効 (EX_NOPERM)
    Unauthenticated,
    /// ロールに許可されていない操作 (EX_NOPERM)
    Forbidden,
    /// アカウントが存在しない (EX_NOINPUT)
    NotFound,
    /// 既に登録済み (EX_CANTCREAT)
    Conflict,
    /// アカウントファイルや単語リストの読み書き失敗 (EX_IOERR)
    DataAccess,
    /// 鍵ファイルの不備 (EX_CONFIG)
    Configuration,
    /// 上記以外 (EX_SOFTWARE)
    Internal,
}

impl ErrorKind {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Validation => 65,
            Self::NotFound => 66,
            Self::Internal => 70,
            Self::Conflict => 73,
            Self::DataAccess => 74,
            Self::Unauthenticated | Self::Forbidden => 77,
            Self::Configuration => 78,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "Validation",
            Self::Unauthenticated => "Unauthenticated",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::Conflict => "Conflict",
            Self::DataAccess => "Data Access",
            Self::Configuration => "Configuration",
            Self::Internal => "Internal",
        }
    }

    /// ストレージ・鍵・内部の障害。利用者の再入力では解決しない
    pub const fn is_system_fault(self) -> bool {
        matches!(
            self,
            Self::DataAccess | Self::Configuration | Self::Internal
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
