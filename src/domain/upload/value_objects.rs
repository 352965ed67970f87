//! Upload Context - Value Objects

use super::UploadError;

/// Windows 保留设备名，净化后的文件名不能以此开头
const WINDOWS_DEVICE_FILES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Flac,
    Ogg,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
        }
    }
}

/// 上传策略 - 允许的扩展名与大小上限
///
/// 不变量:
/// - 扩展名全部为小写，不含前导点
/// - max_size > 0
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_extensions: Vec<String>,
    max_size: u64,
}

impl UploadPolicy {
    pub fn new<I, S>(allowed_extensions: I, max_size: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
            max_size,
        }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// 校验原始文件名，返回小写扩展名
    ///
    /// 扩展名取最后一个 `.` 之后的部分；没有 `.` 的文件名一律拒绝
    pub fn check_filename(&self, filename: &str) -> Result<String, UploadError> {
        if filename.is_empty() {
            return Err(UploadError::NoSelectedFile);
        }

        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .ok_or(UploadError::InvalidFileType)?;

        if self.allowed_extensions.iter().any(|allowed| *allowed == ext) {
            Ok(ext)
        } else {
            Err(UploadError::InvalidFileType)
        }
    }

    /// 检查文件大小
    ///
    /// HTTP 路径上请求体限制先于此检查生效（限制作用于整个 multipart 请求体）
    pub fn check_size(&self, size: u64) -> Result<(), UploadError> {
        if size > self.max_size {
            return Err(UploadError::FileTooLarge {
                size,
                limit: self.max_size,
            });
        }
        Ok(())
    }
}

/// 净化客户端提供的文件名
///
/// - 丢弃非 ASCII 字符
/// - 路径分隔符视为空白，空白序列折叠为 `_`
/// - 只保留 `[A-Za-z0-9_.-]`
/// - 去掉首尾的 `.` 和 `_`
/// - Windows 设备名前加 `_`
///
/// 结果可能为空字符串，调用方需自行兜底
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let stripped: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let mut sanitized = stripped.trim_matches(|c| c == '.' || c == '_').to_string();

    let stem = sanitized.split('.').next().unwrap_or_default().to_uppercase();
    if !sanitized.is_empty() && WINDOWS_DEVICE_FILES.contains(&stem.as_str()) {
        sanitized.insert(0, '_');
    }

    sanitized
}
