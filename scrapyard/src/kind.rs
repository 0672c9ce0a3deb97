use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileKind {
    Archive,
    Audio,
    Code,
    Directory,
    DiskImage,
    Document,
    Executable,
    Image,
    Other,
    Pdf,
    Presentation,
    Spreadsheet,
    Text,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Archive => "archive",
            FileKind::Audio => "audio",
            FileKind::Code => "code",
            FileKind::Directory => "directory",
            FileKind::DiskImage => "disk image",
            FileKind::Document => "document",
            FileKind::Executable => "executable",
            FileKind::Image => "image",
            FileKind::Other => "other",
            FileKind::Pdf => "pdf",
            FileKind::Presentation => "presentation",
            FileKind::Spreadsheet => "spreadsheet",
            FileKind::Text => "text",
        }
    }
}

pub fn classify(name: &str, is_directory: bool) -> FileKind {
    if is_directory {
        return FileKind::Directory;
    }

    let extension = match Path::new(name).extension() {
        Some(extension) => extension.to_string_lossy().to_ascii_lowercase(),
        None => return FileKind::Other,
    };

    match extension.as_str() {
        "doc" | "docx" => FileKind::Document,
        "ppt" | "pptx" => FileKind::Presentation,
        "csv" | "xls" | "xlsx" => FileKind::Spreadsheet,
        "pdf" => FileKind::Pdf,
        "bmp" | "gif" | "jpeg" | "jpg" | "png" | "svg" => FileKind::Image,
        "aac" | "flac" | "m4a" | "mp3" | "ogg" | "wav" => FileKind::Audio,
        "7z" | "bz2" | "gz" | "rar" | "tar" | "zip" => FileKind::Archive,
        "bin" | "dmg" | "iso" => FileKind::DiskImage,
        "app" | "bat" | "exe" => FileKind::Executable,
        "c" | "cpp" | "css" | "html" | "java" | "js" | "json" | "py" | "rs" | "sh" | "ts"
        | "tsx" => FileKind::Code,
        "md" | "txt" => FileKind::Text,
        _ => FileKind::Other,
    }
}
