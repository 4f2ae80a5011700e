//! Artifact infrastructure — HTTP download and decompression.
//!
//! The compressed download lives in a scoped `TempDir` that is removed on
//! every exit path. The decompressed binary is handed back as a `TempPath`
//! owned by the caller.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use indicatif::ProgressBar;
use sha2::{Digest, Sha256};
use xz2::read::XzDecoder;

use crate::application::ports::{ArtifactFetcher, FetchedArtifact};
use crate::domain::error::TransferError;
use crate::domain::release::{ArchiveFormat, ArtifactDigest, file_name_from_url, hex_encode};

/// Connect and per-read timeout for the artifact download.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Release hosts throttle unknown clients; present as a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

const CHUNK_SIZE: usize = 8 * 1024;

/// Builds a progress bar for a download of the given length.
pub type ProgressFactory = fn(u64, &str) -> ProgressBar;

/// Downloads artifacts over HTTP with ureq.
pub struct HttpArtifactFetcher {
    timeout: Duration,
    progress: Option<ProgressFactory>,
}

impl HttpArtifactFetcher {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            progress: None,
        }
    }

    /// Show a progress bar when the server reports a content length.
    #[must_use]
    pub fn with_progress(mut self, factory: ProgressFactory) -> Self {
        self.progress = Some(factory);
        self
    }
}

impl Default for HttpArtifactFetcher {
    fn default() -> Self {
        Self::new(DOWNLOAD_TIMEOUT)
    }
}

impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedArtifact> {
        let url = url.to_string();
        let timeout = self.timeout;
        let progress = self.progress;
        tokio::task::spawn_blocking(move || download(&url, timeout, progress))
            .await
            .context("spawn_blocking for artifact fetch")?
    }
}

fn download(
    url: &str,
    timeout: Duration,
    progress: Option<ProgressFactory>,
) -> Result<FetchedArtifact> {
    let failed = |reason: String| TransferError::Download {
        url: url.to_string(),
        reason,
    };

    tracing::debug!(url, "downloading artifact");
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build();
    let response = match agent.get(url).call() {
        Ok(resp) if resp.status() == 200 => resp,
        Ok(resp) => return Err(failed(format!("HTTP {}", resp.status())).into()),
        Err(ureq::Error::Status(code, _)) => return Err(failed(format!("HTTP {code}")).into()),
        Err(e) => return Err(failed(e.to_string()).into()),
    };

    let file_name = file_name_from_url(url);
    let bar = progress.zip(
        response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok()),
    );
    let bar = bar.map(|(make, len)| make(len, &file_name));

    let staged = stage_artifact(response.into_reader(), &file_name, bar.as_ref());
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    staged.map_err(|e| match e.downcast::<TransferError>() {
        Ok(typed) => typed.into(),
        Err(e) => failed(format!("{e:#}")).into(),
    })
}

/// Write `reader` to scoped storage, unpack it according to `file_name`,
/// and return the executable binary with its digest.
///
/// # Errors
///
/// Returns an error if reading, decompressing, or writing fails, or
/// [`TransferError::EmptyArchive`] when a tarball holds no regular file.
pub fn stage_artifact(
    mut reader: impl Read,
    file_name: &str,
    progress: Option<&ProgressBar>,
) -> Result<FetchedArtifact> {
    let work = tempfile::Builder::new()
        .prefix("fsm-download-")
        .tempdir()
        .context("creating download directory")?;
    let download = work.path().join("download");
    copy_chunked(&mut reader, &download, progress)?;

    let mut binary = tempfile::Builder::new()
        .prefix("frida-server-")
        .tempfile()
        .context("creating artifact file")?;
    let format = ArchiveFormat::from_file_name(file_name);
    tracing::debug!(?format, staged = %download.display(), "unpacking artifact");
    unpack(format, &download, file_name, binary.as_file_mut())?;
    binary.as_file_mut().flush().context("flushing artifact")?;

    let digest = digest_file(binary.path())?;
    set_executable(binary.path())?;
    tracing::debug!(
        path = %binary.path().display(),
        sha256 = %digest.sha256,
        size = digest.size,
        "artifact staged"
    );
    Ok(FetchedArtifact {
        path: binary.into_temp_path(),
        digest,
    })
}

fn copy_chunked(
    reader: &mut impl Read,
    dest: &Path,
    progress: Option<&ProgressBar>,
) -> Result<()> {
    let mut out = File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).context("reading download")?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])
            .with_context(|| format!("writing {}", dest.display()))?;
        if let Some(pb) = progress {
            pb.inc(n as u64);
        }
    }
    out.flush().with_context(|| format!("flushing {}", dest.display()))
}

fn unpack(format: ArchiveFormat, source: &Path, file_name: &str, out: &mut File) -> Result<()> {
    let mut input = BufReader::new(
        File::open(source).with_context(|| format!("opening {}", source.display()))?,
    );
    match format {
        ArchiveFormat::Xz => {
            std::io::copy(&mut XzDecoder::new(input), out).context("decompressing xz")?;
        }
        ArchiveFormat::Gzip => {
            std::io::copy(&mut GzDecoder::new(input), out).context("decompressing gzip")?;
        }
        ArchiveFormat::TarGz => {
            let mut archive = tar::Archive::new(GzDecoder::new(input));
            let mut found = false;
            for entry in archive.entries().context("reading tar archive")? {
                let mut entry = entry.context("reading tar entry")?;
                if entry.header().entry_type().is_file() {
                    std::io::copy(&mut entry, out).context("extracting tar entry")?;
                    found = true;
                    break;
                }
            }
            if !found {
                return Err(TransferError::EmptyArchive(file_name.to_string()).into());
            }
        }
        ArchiveFormat::Raw => {
            std::io::copy(&mut input, out).context("copying artifact")?;
        }
    }
    Ok(())
}

fn digest_file(path: &Path) -> Result<ArtifactDigest> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut size = 0u64;
    loop {
        let n = file.read(&mut buf).context("hashing artifact")?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        size += n as u64;
    }
    Ok(ArtifactDigest {
        sha256: hex_encode(&hasher.finalize()),
        size,
    })
}

fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("cannot set permissions on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
