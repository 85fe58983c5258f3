use crate::LoadPhase;

/// Extensions the local file picker offers.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".md", ".markdown", ".txt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePicker {
    pub accept: Vec<String>,
}

impl Default for FilePicker {
    fn default() -> Self {
        Self {
            accept: ACCEPTED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    Blank,
    Loading {
        url: String,
    },
    Welcome {
        html: String,
        picker: FilePicker,
    },
    Document {
        html: String,
    },
    Error {
        title: String,
        message: String,
        detail: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub base_href: Option<String>,
    pub phase: LoadPhase,
    pub body: PageBody,
}
