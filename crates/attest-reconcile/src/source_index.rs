//! Deduplicated source index
//!
//! One entry per normalized URL, regardless of how many claims cite it
//! or with which fragments. Verification evidence only ever freshens the
//! index; it never rewrites the underlying citations.

use attest_domain::{
    source_key, CitingClaim, ClaimRecord, Outcome, RecordStatus, SourceIndexEntry,
    VerificationResult,
};
use std::collections::{BTreeMap, HashMap};

/// Build the source index from claim snapshots plus the most recent
/// reachability results (keyed by normalized URL). A passing result
/// freshens the entry's verified date; failures leave the entry alone
/// since findings already cover them.
pub fn build_source_index(
    datasets: &BTreeMap<String, Vec<ClaimRecord>>,
    reachability: &HashMap<String, VerificationResult>,
) -> Vec<SourceIndexEntry> {
    let mut entries: BTreeMap<String, SourceIndexEntry> = BTreeMap::new();

    for (dataset_id, claims) in datasets {
        for claim in claims {
            for citation in &claim.citations {
                let key = source_key(&citation.url);
                let citing = CitingClaim {
                    dataset: dataset_id.clone(),
                    claim: claim.effective_key(),
                };
                match entries.get_mut(&key) {
                    None => {
                        entries.insert(
                            key.clone(),
                            SourceIndexEntry {
                                url: key,
                                cited_by: vec![citing],
                                status: citation.status,
                                published_date: citation.published_date,
                                verified_date: citation.verified_date,
                            },
                        );
                    }
                    Some(entry) => {
                        entry.cited_by.push(citing);
                        entry.status = fresher_status(entry.status, citation.status);
                        entry.published_date =
                            entry.published_date.max(citation.published_date);
                        entry.verified_date = entry.verified_date.max(citation.verified_date);
                    }
                }
            }
        }
    }

    let mut entries: Vec<SourceIndexEntry> = entries.into_values().collect();
    for entry in &mut entries {
        entry.cited_by.sort();
        entry.cited_by.dedup();
        if let Some(result) = reachability.get(&entry.url) {
            if result.outcome == Outcome::Pass {
                entry.verified_date = entry.verified_date.max(result.checked_at.date_naive());
            }
        }
    }
    entries.sort_by(SourceIndexEntry::contract_cmp);
    entries
}

/// Any active citation keeps the shared URL active; otherwise the most
/// informative non-active status wins.
fn fresher_status(a: RecordStatus, b: RecordStatus) -> RecordStatus {
    let rank = |s: RecordStatus| match s {
        RecordStatus::Active => 3,
        RecordStatus::Modified => 2,
        RecordStatus::Deprecated => 1,
        RecordStatus::Unknown => 0,
    };
    if rank(b) > rank(a) {
        b
    } else {
        a
    }
}
