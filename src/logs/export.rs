// sticky-scroll - Auto-follow scrolling for chat and log transcripts
// Copyright (C) 2025  The sticky-scroll contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "sticky-logs";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export directory {} is not usable", .0.display())]
    InvalidDir(PathBuf),
    #[error("failed to write log export {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where exports land when no directory is configured: the user's download
/// folder, then home, then the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().or_else(dirs::home_dir).unwrap_or_else(|| PathBuf::from("."))
}

/// `sticky-logs-<label>-<YYYY-MM-DD-HH-MM-SS>.log` for the given instant.
pub fn export_file_name(label: &str, at: DateTime<Utc>) -> String {
    format!("{FILE_PREFIX}-{label}-{}.log", at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Write `lines` as a newline-terminated text file under `dir`.
///
/// Nothing is written for an empty buffer and `Ok(None)` is returned.
pub fn export_logs(
    lines: &[String],
    label: &str,
    dir: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    export_logs_at(lines, label, dir, Utc::now())
}

pub(crate) fn export_logs_at(
    lines: &[String],
    label: &str,
    dir: &Path,
    at: DateTime<Utc>,
) -> Result<Option<PathBuf>, ExportError> {
    if lines.is_empty() {
        return Ok(None);
    }
    if !dir.is_dir() {
        return Err(ExportError::InvalidDir(dir.to_path_buf()));
    }

    let path = dir.join(export_file_name(label, at));
    let write = |path: &Path| -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(lines.join("\n").as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()
    };
    write(&path).map_err(|source| ExportError::Write { path: path.clone(), source })?;

    tracing::info!(path = %path.display(), lines = lines.len(), "exported logs");
    Ok(Some(path))
}
