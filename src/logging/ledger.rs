//! Append-only decision ledger with digest chaining and rotation.
//!
//! Each decision is recorded as one JSON line wrapping the decision in an
//! envelope: `{recorded_at, prev_digest, digest, decision}` where `digest`
//! is SHA-256 over the previous digest concatenated with the canonical
//! decision JSON. Appends are serialized through a mutex so unbounded
//! concurrent enforcement callers never interleave partial lines. Size
//! limits and rotation cap growth; the digest chain continues across
//! rotated files.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::settings::LedgerConfig;
use crate::enforce::Decision;

/// All-zero digest anchoring a fresh chain.
const GENESIS_DIGEST: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to access ledger file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize ledger record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Ledger chain broken at line {line}")]
    ChainBroken { line: usize },
}

/// One ledger line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Envelope timestamp; the decision itself carries none.
    pub recorded_at: String,
    pub prev_digest: String,
    pub digest: String,
    pub decision: serde_json::Value,
}

/// Append-only decision ledger. Cheap to share behind an `Arc`; the
/// internal mutex is the single-writer discipline.
pub struct DecisionLedger {
    path: PathBuf,
    config: LedgerConfig,
    last_digest: Mutex<String>,
}

impl DecisionLedger {
    /// Open (or create) a ledger, recovering the chain tip from the last
    /// line of an existing file.
    pub fn open(config: LedgerConfig) -> Result<Self, LedgerError> {
        let path = config.path.clone();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;

        let last_digest = recover_tip(&path)?.unwrap_or_else(|| GENESIS_DIGEST.to_string());

        Ok(Self {
            path,
            config,
            last_digest: Mutex::new(last_digest),
        })
    }

    /// Append one decision. The lock spans digest computation through the
    /// file write, so records from concurrent callers land whole and the
    /// chain stays linear.
    pub fn append(&self, decision: &Decision) -> Result<(), LedgerError> {
        let mut tip = self.last_digest.lock();

        self.rotate_if_needed()?;

        // Canonicalize through a Value so append and verify agree on key
        // order regardless of struct field order.
        let decision_value = serde_json::to_value(decision)?;
        let canonical = serde_json::to_string(&decision_value)?;
        let digest = chain_digest(&tip, &canonical);

        let record = LedgerRecord {
            recorded_at: Utc::now().to_rfc3339(),
            prev_digest: tip.clone(),
            digest: digest.clone(),
            decision: decision_value,
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        *tip = digest;
        Ok(())
    }

    /// Verify the digest chain of a ledger file. Returns the number of
    /// valid records, or the first broken line.
    pub fn verify_chain(path: &Path) -> Result<usize, LedgerError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut count = 0usize;
        let mut prev: Option<String> = None;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: LedgerRecord = serde_json::from_str(&line)
                .map_err(|_| LedgerError::ChainBroken { line: index + 1 })?;

            // The first record may continue a chain from a rotated file,
            // so its prev_digest is accepted as-is.
            if let Some(prev) = &prev {
                if record.prev_digest != *prev {
                    return Err(LedgerError::ChainBroken { line: index + 1 });
                }
            }

            let canonical = serde_json::to_string(&record.decision)?;
            if chain_digest(&record.prev_digest, &canonical) != record.digest {
                return Err(LedgerError::ChainBroken { line: index + 1 });
            }

            prev = Some(record.digest);
            count += 1;
        }
        Ok(count)
    }

    /// Rotate when the active file exceeds the size limit. Callers hold
    /// the append lock.
    fn rotate_if_needed(&self) -> Result<(), LedgerError> {
        let size = match fs::metadata(&self.path) {
            Ok(m) => m.len(),
            Err(_) => return Ok(()), // File doesn't exist yet
        };
        if size < self.config.max_file_bytes {
            return Ok(());
        }

        // Shift rotated files: .3 -> .4, .2 -> .3, .1 -> .2.
        // Delete the oldest if beyond max_rotated_files.
        for i in (1..=self.config.max_rotated_files).rev() {
            let src = self.rotated_path(i);
            let dst = self.rotated_path(i + 1);
            if src.exists() {
                if i == self.config.max_rotated_files {
                    let _ = fs::remove_file(&src);
                } else {
                    let _ = fs::rename(&src, &dst);
                }
            }
        }

        let _ = fs::rename(&self.path, self.rotated_path(1));
        File::create(&self.path)?;

        Ok(())
    }

    fn rotated_path(&self, n: u32) -> PathBuf {
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        self.path.with_file_name(format!("{}.{}", name, n))
    }
}

fn chain_digest(prev_digest: &str, canonical_decision: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prev_digest.as_bytes());
    hasher.update(canonical_decision.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The digest of the last complete record in an existing file, if any.
fn recover_tip(path: &Path) -> Result<Option<String>, LedgerError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut tip = None;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(record) = serde_json::from_str::<LedgerRecord>(&line) {
            tip = Some(record.digest);
        }
    }
    Ok(tip)
}
