//! JSON-lines persistence for the ledger. One entry per line; the file
//! is loaded whole at startup and atomically rewritten after mutations
//! (write to a temp file, then rename over the original). Advisory file
//! locks guard against a concurrent process touching the same file.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, warn};

use crate::ledger::{entry::TimeEntry, Ledger};

pub const LEDGER_FILE_NAME: &str = "ledger.jsonl";

pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(application_data_path: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(application_data_path)?;
        Ok(Self {
            path: application_data_path.join(LEDGER_FILE_NAME),
        })
    }

    /// Reads the whole ledger from disk. Lines that fail to parse are
    /// logged and skipped, as are rows the ledger itself rejects (for
    /// example a duplicated timestamp); a corrupt file never aborts the
    /// load.
    pub async fn load(&self) -> Result<Ledger> {
        debug!("Loading ledger from {:?}", self.path);
        let file = match File::open(&self.path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Ledger::new()),
            Err(e) => return Err(e.into()),
        };
        file.lock_shared()?;

        let buffer = BufReader::new(file);
        let mut lines = buffer.lines();
        let mut ledger = Ledger::new();
        let mut corrupt = 0usize;
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TimeEntry>(&line) {
                Ok(entry) => {
                    if let Err(e) = ledger.append(entry) {
                        corrupt += 1;
                        warn!("Skipping ledger row rejected on replay: {e}");
                    }
                }
                Err(e) => {
                    corrupt += 1;
                    warn!(
                        "Skipping illegal json line in {:?}: {e}: {line}",
                        self.path
                    );
                }
            }
        }
        if corrupt > 0 {
            warn!("Ledger load skipped {corrupt} corrupt rows");
        }

        lines.into_inner().into_inner().unlock_async().await?;
        Ok(ledger)
    }

    /// Persists the full ledger state.
    pub async fn save(&self, ledger: &Ledger) -> Result<()> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .await?;
        // Semi-safe acquire-release for the file while the replacement is
        // being prepared
        file.lock_exclusive()?;
        let result = self.replace_with(ledger).await;
        file.unlock_async().await?;
        result
    }

    async fn replace_with(&self, ledger: &Ledger) -> Result<()> {
        let mut buffer = Vec::<u8>::new();
        for entry in ledger.all_entries() {
            serde_json::to_writer(&mut buffer, entry)?;
            buffer.push(b'\n');
        }

        let temp_path = self.path.with_extension("jsonl.tmp");
        let mut temp = File::create(&temp_path).await?;
        temp.write_all(&buffer).await?;
        temp.flush().await?;
        temp.sync_all().await?;
        drop(temp);

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}
