use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKeeperError {
    Validation(String),
    Conflict(String),
    NotFound(String),
    Expired(String),
    Generation(String),
    FileOperation(String),
    Serialization(String),
}

impl UrlKeeperError {
    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UrlKeeperError::Validation(_) => "E001",
            UrlKeeperError::Conflict(_) => "E002",
            UrlKeeperError::NotFound(_) => "E003",
            UrlKeeperError::Expired(_) => "E004",
            UrlKeeperError::Generation(_) => "E005",
            UrlKeeperError::FileOperation(_) => "E006",
            UrlKeeperError::Serialization(_) => "E007",
        }
    }

    /// 错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UrlKeeperError::Validation(_) => "Validation Error",
            UrlKeeperError::Conflict(_) => "Shortcode Conflict",
            UrlKeeperError::NotFound(_) => "Short URL Not Found",
            UrlKeeperError::Expired(_) => "Short URL Expired",
            UrlKeeperError::Generation(_) => "Shortcode Generation Error",
            UrlKeeperError::FileOperation(_) => "File Operation Error",
            UrlKeeperError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UrlKeeperError::Validation(msg)
            | UrlKeeperError::Conflict(msg)
            | UrlKeeperError::NotFound(msg)
            | UrlKeeperError::Expired(msg)
            | UrlKeeperError::Generation(msg)
            | UrlKeeperError::FileOperation(msg)
            | UrlKeeperError::Serialization(msg) => msg,
        }
    }

    /// Whether the error comes from user input rather than the local store
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            UrlKeeperError::Validation(_)
                | UrlKeeperError::Conflict(_)
                | UrlKeeperError::NotFound(_)
                | UrlKeeperError::Expired(_)
        )
    }

    /// 彩色输出（CLI 使用）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UrlKeeperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UrlKeeperError {}

impl UrlKeeperError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::Expired(msg.into())
    }

    pub fn generation<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::Generation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UrlKeeperError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for UrlKeeperError {
    fn from(err: std::io::Error) -> Self {
        UrlKeeperError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for UrlKeeperError {
    fn from(err: serde_json::Error) -> Self {
        UrlKeeperError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UrlKeeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            UrlKeeperError::validation("a"),
            UrlKeeperError::conflict("b"),
            UrlKeeperError::not_found("c"),
            UrlKeeperError::expired("d"),
            UrlKeeperError::generation("e"),
            UrlKeeperError::file_operation("f"),
            UrlKeeperError::serialization("g"),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = UrlKeeperError::conflict("The provided shortcode is already in use");
        assert_eq!(
            err.to_string(),
            "Shortcode Conflict: The provided shortcode is already in use"
        );
    }

    #[test]
    fn test_user_errors() {
        assert!(UrlKeeperError::expired("x").is_user_error());
        assert!(UrlKeeperError::not_found("x").is_user_error());
        assert!(!UrlKeeperError::file_operation("x").is_user_error());
        assert!(!UrlKeeperError::generation("x").is_user_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: UrlKeeperError = io_error.into();
        assert!(matches!(err, UrlKeeperError::FileOperation(ref m) if m.contains("denied")));
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: UrlKeeperError = json_err.into();
        assert_eq!(err.code(), "E007");
    }
}
