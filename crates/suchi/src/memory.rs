use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use naamkhoj_types::{AcId, IndexFamily, RowId, ScoreRow, SearchConfig};
use naamkhoj_varna::norm_strict;

use crate::store::{IndexStore, PostingRow, RowStore, StoreError};

/// One row of a JSON snapshot, before normalization.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct RawRow {
    pub ac: AcId,
    pub row_id: RowId,
    pub voter_name: String,
    pub relative_name: String,
    pub serial_no: u64,
}

/// In-memory index + row store, fed through the same key builder queries
/// use. Backs tests and the CLI's snapshot mode; the production stores live
/// behind the same traits in the serving layer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cfg: SearchConfig,
    postings: FxHashMap<(IndexFamily, AcId), BTreeMap<String, BTreeSet<RowId>>>,
    rows: FxHashMap<AcId, BTreeMap<RowId, ScoreRow>>,
}

impl MemoryStore {
    pub fn new(cfg: SearchConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn from_rows(cfg: SearchConfig, rows: impl IntoIterator<Item = RawRow>) -> Self {
        let mut store = Self::new(cfg);
        for row in rows {
            store.insert(row);
        }
        store
    }

    /// Index one raw row: derive the normalized fields and post its id under
    /// every key of every family, exactly as the offline loader would.
    pub fn insert(&mut self, raw: RawRow) {
        let score_row = ScoreRow {
            row_id: raw.row_id,
            voter_name_norm: norm_strict(&raw.voter_name),
            relative_name_norm: norm_strict(&raw.relative_name),
            voter_name_raw: raw.voter_name,
            relative_name_raw: raw.relative_name,
            serial_no: raw.serial_no,
        };

        for family in IndexFamily::ALL {
            let name = match family.field {
                naamkhoj_types::Field::Voter => &score_row.voter_name_raw,
                naamkhoj_types::Field::Relative => &score_row.relative_name_raw,
            };
            for key in naamkhoj_kunji::build_keys(family.form, name, &self.cfg) {
                self.postings
                    .entry((family, raw.ac))
                    .or_default()
                    .entry(key)
                    .or_default()
                    .insert(raw.row_id);
            }
        }

        self.rows
            .entry(raw.ac)
            .or_default()
            .insert(raw.row_id, score_row);
    }

    pub fn row_count(&self, ac: AcId) -> usize {
        self.rows.get(&ac).map_or(0, BTreeMap::len)
    }

    /// All ACs present in the snapshot, ascending.
    pub fn acs(&self) -> Vec<AcId> {
        let mut acs: Vec<AcId> = self.rows.keys().copied().collect();
        acs.sort_unstable();
        acs
    }

    fn known_ac(&self, ac: AcId) -> Result<(), StoreError> {
        if self.rows.contains_key(&ac) {
            Ok(())
        } else {
            Err(StoreError::UnknownAc(ac))
        }
    }

    fn encode(ids: &BTreeSet<RowId>) -> (Vec<u8>, u64) {
        let n = ids.len() as u64;
        let fits_u32 = ids.last().is_none_or(|&max| max <= u64::from(u32::MAX));
        let blob = if fits_u32 {
            ids.iter()
                .flat_map(|&id| (id as u32).to_le_bytes())
                .collect()
        } else {
            ids.iter().flat_map(|&id| id.to_le_bytes()).collect()
        };
        (blob, n)
    }
}

impl IndexStore for MemoryStore {
    async fn postings(
        &self,
        family: IndexFamily,
        ac: AcId,
        keys: Vec<String>,
    ) -> Result<Vec<PostingRow>, StoreError> {
        self.known_ac(ac)?;
        let Some(index) = self.postings.get(&(family, ac)) else {
            return Ok(Vec::new());
        };
        Ok(keys
            .into_iter()
            .filter_map(|key| {
                index.get(&key).map(|ids| {
                    let (row_ids, n) = Self::encode(ids);
                    PostingRow {
                        key,
                        row_ids,
                        n: Some(n),
                    }
                })
            })
            .collect())
    }
}

impl RowStore for MemoryStore {
    async fn fetch_rows(&self, ac: AcId, ids: Vec<RowId>) -> Result<Vec<ScoreRow>, StoreError> {
        self.known_ac(ac)?;
        let rows = &self.rows[&ac];
        Ok(ids
            .into_iter()
            .filter_map(|id| rows.get(&id).cloned())
            .collect())
    }
}
