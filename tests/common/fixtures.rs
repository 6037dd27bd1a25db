// Test fixtures: documents on disk and canned text

use std::path::PathBuf;
use tempfile::TempDir;

/// "The sky is blue. " repeated `times` times
#[allow(dead_code)]
pub fn sky_text(times: usize) -> String {
    "The sky is blue. ".repeat(times)
}

/// Write a document into `dir` and return its path
#[allow(dead_code)]
pub fn write_document(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write document");
    path
}

/// A directory of documents used across tests
#[allow(dead_code)]
pub struct TestDocs {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestDocs {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Short fact sheet about colours
    pub fn colors(&self) -> PathBuf {
        write_document(
            &self.dir,
            "colors.txt",
            b"The sky is blue. Grass is green. Snow is white. \
              Blood is red. Coal is black. Bananas are yellow.",
        )
    }

    /// Two clearly separated topics
    pub fn two_topics(&self) -> PathBuf {
        let mut text = String::new();
        text.push_str(&"Rust ownership moves values between bindings. ".repeat(20));
        text.push_str(&"Sourdough bread needs flour water salt and starter. ".repeat(20));
        write_document(&self.dir, "topics.md", text.as_bytes())
    }

    pub fn empty(&self) -> PathBuf {
        write_document(&self.dir, "empty.txt", b"")
    }

    pub fn binary(&self) -> PathBuf {
        write_document(&self.dir, "image.bin", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xd8, 0x00])
    }

    pub fn broken_pdf(&self) -> PathBuf {
        write_document(&self.dir, "broken.pdf", b"%PDF-1.4\n%%no objects here")
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
