use serde::{Deserialize, Serialize};

/// How a caller wants file content handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    Text,
    Binary,
}

impl ContentKind {
    pub fn from_binary_flag(binary: bool) -> Self {
        if binary {
            ContentKind::Binary
        } else {
            ContentKind::Text
        }
    }
}

/// Decoded file content, either UTF-8 text or raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    /// Interpret `bytes` according to `kind`; text must be valid UTF-8.
    pub fn decode(bytes: Vec<u8>, kind: ContentKind) -> Result<Self, std::string::FromUtf8Error> {
        match kind {
            ContentKind::Binary => Ok(FileContent::Binary(bytes)),
            ContentKind::Text => String::from_utf8(bytes).map(FileContent::Text),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FileContent::Text(text) => text.into_bytes(),
            FileContent::Binary(bytes) => bytes,
        }
    }
}

/// Result of a structured read: upstream metadata with decoded content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub content: FileContent,
    pub sha: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub encoding: String,
    pub name: String,
    pub path: String,
    pub download_url: Option<String>,
    pub url: Option<String>,
    pub git_url: Option<String>,
    pub html_url: Option<String>,
}

/// Contents API body for a single file, content still base64-encoded
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    #[serde(default)]
    pub content: Option<String>,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl ContentsEntry {
    pub fn into_record(self, content: FileContent) -> FileRecord {
        FileRecord {
            content,
            sha: self.sha,
            size: self.size,
            item_type: self.item_type,
            encoding: self.encoding.unwrap_or_default(),
            name: self.name,
            path: self.path,
            download_url: self.download_url,
            url: self.url,
            git_url: self.git_url,
            html_url: self.html_url,
        }
    }
}

/// PUT body creating a new file. Carries no revision token.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest {
    pub message: String,
    pub content: String,
    pub branch: String,
}

/// PUT body replacing an existing file at revision `sha`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub message: String,
    pub content: String,
    pub sha: String,
    pub branch: String,
}

/// DELETE body removing the file at revision `sha`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest {
    pub message: String,
    pub sha: String,
    pub branch: String,
}
