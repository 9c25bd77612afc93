//! Pipeline for turning export files into a JSONL training corpus.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::accounting::{count_record_tokens, TiktokenTokenizer};
use crate::config::Config;
use crate::markup::extract_text;
use crate::record::{build_record, Prompts};
use crate::segment::{count_post_headers, extract_posts, normalize_newlines};
use crate::{Error, Result, Tokenizer};

/// Result of writing a corpus file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    pub records_written: usize,
    /// Original posts whose text was empty after flattening.
    pub posts_skipped: usize,
    pub total_tokens: usize,
}

/// Discover the export files directly inside `dir`, sorted by path.
pub fn discover_export_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            Error::io(path, source)
        })?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Post bodies across a list of export files, produced lazily.
///
/// Each file is read only once the previous one is drained. A read failure
/// is yielded once and ends the iteration.
pub struct ExportPosts {
    files: std::vec::IntoIter<PathBuf>,
    pending: VecDeque<String>,
    failed: bool,
}

impl ExportPosts {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
            pending: VecDeque::new(),
            failed: false,
        }
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let text = normalize_newlines(&raw);
        self.pending.extend(extract_posts(&text).map(str::to_string));
        info!(
            file = %path.display(),
            posts = count_post_headers(&text),
            originals = self.pending.len(),
            "Read export file"
        );
        Ok(())
    }
}

impl Iterator for ExportPosts {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(post) = self.pending.pop_front() {
                return Some(Ok(post));
            }
            let path = self.files.next()?;
            if let Err(e) = self.load(&path) {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

/// Write one training record per non-empty post to `output_path`.
///
/// The file is truncated first. Each line is fully serialized before it is
/// written, so a failure never leaves a partial record behind.
pub fn write_corpus<I, T>(
    posts: I,
    output_path: &Path,
    prompts: &Prompts<'_>,
    tokenizer: &T,
) -> Result<CorpusStats>
where
    I: IntoIterator<Item = Result<String>>,
    T: Tokenizer + ?Sized,
{
    let file = File::create(output_path).map_err(|e| Error::io(output_path, e))?;
    let mut writer = BufWriter::new(file);
    let mut stats = CorpusStats::default();

    for post in posts {
        let post = post?;
        let content = extract_text(&post);
        if content.is_empty() {
            debug!("Skipping post with no text content");
            stats.posts_skipped += 1;
            continue;
        }

        let record = build_record(content, prompts);
        let mut line = record.to_json_line()?;
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .map_err(|e| Error::io(output_path, e))?;

        stats.total_tokens += count_record_tokens(&record, tokenizer);
        stats.records_written += 1;
    }

    writer.flush().map_err(|e| Error::io(output_path, e))?;
    Ok(stats)
}

/// Run the whole pipeline described by `config`.
///
/// The tokenizer is resolved before any file is touched, so an unknown model
/// fails without creating output.
pub fn run(config: &Config) -> Result<CorpusStats> {
    let tokenizer = TiktokenTokenizer::for_model(&config.model_name)?;
    let training = &config.training;

    std::fs::create_dir_all(&training.data_directory)
        .map_err(|e| Error::io(&training.data_directory, e))?;
    if let Some(parent) = training.output_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    let files = discover_export_files(&training.data_directory)?;
    if files.is_empty() {
        warn!(
            dir = %training.data_directory.display(),
            "No export files found"
        );
    }

    write_corpus(
        ExportPosts::new(files),
        &training.output_file,
        &config.prompts(),
        &tokenizer,
    )
}
