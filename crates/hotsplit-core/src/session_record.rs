#![forbid(unsafe_code)]

//! Deterministic session recording and replay.
//!
//! [`SessionRecorder`] wraps an [`InputDispatcher`] and records every applied
//! input together with a frame checkpoint: an FNV-1a checksum over the split
//! rendered by every registered widget, chained across frames. [`replay`]
//! drives a freshly bootstrapped dispatcher with the recorded inputs and
//! reports any checkpoint that differs.
//!
//! Given identical markup geometry, replay must reproduce every checksum: the
//! core has no clock and no hidden state beyond the inputs delivered.
//!
//! Traces serialize to JSONL, one record per line.

use serde::{Deserialize, Serialize};

use crate::dispatcher::{DispatchOutcome, HostInput, InputDispatcher};
use crate::host::WidgetRoot;

/// Schema version for session traces.
pub const SCHEMA_VERSION: &str = "hotsplit-trace-v1";

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;
// Marks a registration without a rendered split in the checksum stream.
const NO_RATIO_BITS: u64 = u64::MAX;

fn fnv1a64_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn fnv1a64_u64(hash: u64, v: u64) -> u64 {
    fnv1a64_bytes(hash, &v.to_le_bytes())
}

fn fnv1a64_pair(prev: u64, next: u64) -> u64 {
    let hash = FNV_OFFSET_BASIS;
    let hash = fnv1a64_u64(hash, prev);
    fnv1a64_u64(hash, next)
}

/// Checksum of the split rendered by every registration.
pub fn checksum_dispatcher<R: WidgetRoot>(dispatcher: &InputDispatcher<R>) -> u64 {
    dispatcher
        .ratios()
        .fold(FNV_OFFSET_BASIS, |hash, (id, ratio)| {
            let hash = fnv1a64_u64(hash, u64::from(id.get()));
            let bits = ratio.map_or(NO_RATIO_BITS, |r| r.get().to_bits());
            fnv1a64_u64(hash, bits)
        })
}

/// A single record in a session trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum TraceRecord {
    /// Session header (must be first).
    Header { schema: String, widgets: usize },
    /// An applied input.
    Input { seq: u64, event: HostInput },
    /// Frame checkpoint with checksum.
    Frame {
        frame_idx: u64,
        checksum: u64,
        checksum_chain: u64,
    },
    /// Trace summary (must be last).
    Summary {
        total_frames: u64,
        final_checksum_chain: u64,
    },
}

/// Errors from loading or replaying a trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// First record is not a header, or the trace is empty.
    #[error("trace missing header record")]
    MissingHeader,
    /// Replay page registers a different number of widgets.
    #[error("widget count mismatch: trace has {expected}, page has {actual}")]
    WidgetCountMismatch { expected: usize, actual: usize },
    /// A JSONL line failed to parse.
    #[error("invalid trace record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// A complete recorded session trace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionTrace {
    pub records: Vec<TraceRecord>,
}

impl SessionTrace {
    /// Number of frame checkpoints in the trace.
    pub fn frame_count(&self) -> u64 {
        self.records
            .iter()
            .filter(|r| matches!(r, TraceRecord::Frame { .. }))
            .count() as u64
    }

    /// Final checksum chain from the summary record.
    pub fn final_checksum_chain(&self) -> Option<u64> {
        self.records.iter().rev().find_map(|r| match r {
            TraceRecord::Summary {
                final_checksum_chain,
                ..
            } => Some(*final_checksum_chain),
            _ => None,
        })
    }

    /// Serialize as JSONL.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse JSONL, skipping blank lines.
    pub fn from_jsonl(text: &str) -> Result<Self, ReplayError> {
        let records = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| ReplayError::InvalidRecord {
                    line: idx + 1,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }
}

/// Records a session for deterministic replay.
pub struct SessionRecorder<R: WidgetRoot> {
    dispatcher: InputDispatcher<R>,
    records: Vec<TraceRecord>,
    next_seq: u64,
    frame_idx: u64,
    checksum_chain: u64,
}

impl<R: WidgetRoot> SessionRecorder<R> {
    /// Start recording. The initial render is captured as frame 0.
    pub fn new(dispatcher: InputDispatcher<R>) -> Self {
        let widgets = dispatcher.len();
        let mut recorder = Self {
            dispatcher,
            records: vec![TraceRecord::Header {
                schema: SCHEMA_VERSION.to_owned(),
                widgets,
            }],
            next_seq: 0,
            frame_idx: 0,
            checksum_chain: 0,
        };
        recorder.record_frame();
        recorder
    }

    /// Apply one input and record it with the resulting frame.
    pub fn apply(&mut self, event: HostInput) -> DispatchOutcome {
        self.records.push(TraceRecord::Input {
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
        let outcome = self.dispatcher.apply(event);
        self.record_frame();
        outcome
    }

    /// Finish recording and return the trace.
    pub fn finish(mut self) -> SessionTrace {
        self.records.push(TraceRecord::Summary {
            total_frames: self.frame_idx,
            final_checksum_chain: self.checksum_chain,
        });
        SessionTrace {
            records: self.records,
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &InputDispatcher<R> {
        &self.dispatcher
    }

    fn record_frame(&mut self) {
        let checksum = checksum_dispatcher(&self.dispatcher);
        self.checksum_chain = fnv1a64_pair(self.checksum_chain, checksum);
        self.records.push(TraceRecord::Frame {
            frame_idx: self.frame_idx,
            checksum,
            checksum_chain: self.checksum_chain,
        });
        self.frame_idx += 1;
    }
}

/// One frame whose checksum differed on replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayMismatch {
    pub frame_idx: u64,
    pub expected: u64,
    pub actual: u64,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub total_frames: u64,
    pub final_checksum_chain: u64,
    pub mismatches: Vec<ReplayMismatch>,
}

impl ReplayResult {
    /// Whether every checkpoint matched.
    pub fn ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Replay `trace` through `dispatcher` (freshly bootstrapped from the same
/// markup) and compare every frame checkpoint.
pub fn replay<R: WidgetRoot>(
    mut dispatcher: InputDispatcher<R>,
    trace: &SessionTrace,
) -> Result<ReplayResult, ReplayError> {
    let Some(TraceRecord::Header { widgets, .. }) = trace.records.first() else {
        return Err(ReplayError::MissingHeader);
    };
    if *widgets != dispatcher.len() {
        return Err(ReplayError::WidgetCountMismatch {
            expected: *widgets,
            actual: dispatcher.len(),
        });
    }

    let mut total_frames = 0;
    let mut chain = 0;
    let mut mismatches = Vec::new();
    for record in &trace.records[1..] {
        match record {
            TraceRecord::Input { event, .. } => {
                dispatcher.apply(*event);
            }
            TraceRecord::Frame {
                frame_idx,
                checksum,
                ..
            } => {
                let actual = checksum_dispatcher(&dispatcher);
                chain = fnv1a64_pair(chain, actual);
                total_frames += 1;
                if actual != *checksum {
                    mismatches.push(ReplayMismatch {
                        frame_idx: *frame_idx,
                        expected: *checksum,
                        actual,
                    });
                }
            }
            TraceRecord::Header { .. } | TraceRecord::Summary { .. } => {}
        }
    }

    Ok(ReplayResult {
        total_frames,
        final_checksum_chain: chain,
        mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::{fnv1a64_pair, ReplayError, SessionTrace, TraceRecord};

    #[test]
    fn fnv1a64_pair_is_deterministic() {
        assert_eq!(fnv1a64_pair(1, 2), fnv1a64_pair(1, 2));
        assert_ne!(fnv1a64_pair(1, 2), fnv1a64_pair(2, 1));
    }

    #[test]
    fn empty_trace_has_no_header() {
        let trace = SessionTrace::default();
        assert_eq!(trace.frame_count(), 0);
        assert_eq!(trace.final_checksum_chain(), None);
    }

    #[test]
    fn jsonl_reports_bad_line_number() {
        let text = "{\"record\":\"header\",\"schema\":\"x\",\"widgets\":0}\n\nnot json\n";
        let err = SessionTrace::from_jsonl(text).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn jsonl_record_shape() {
        let trace = SessionTrace {
            records: vec![TraceRecord::Summary {
                total_frames: 2,
                final_checksum_chain: 7,
            }],
        };
        let jsonl = trace.to_jsonl().unwrap();
        assert_eq!(
            jsonl,
            "{\"record\":\"summary\",\"total_frames\":2,\"final_checksum_chain\":7}\n"
        );
        assert_eq!(SessionTrace::from_jsonl(&jsonl).unwrap(), trace);
    }
}
