use naamkhoj_types::RowId;

/// A posting blob that conforms to none of the supported encodings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated varint at byte {0}")]
    TruncatedVarint(usize),

    #[error("varint wider than 64 bits at byte {0}")]
    OversizedVarint(usize),

    #[error("decoded {got} ids, companion column says {expected}")]
    CountMismatch { expected: u64, got: u64 },

    #[error("cumulative row-id sum overflowed")]
    SumOverflow,
}

/// Decode a posting-list blob into row ids.
///
/// The offline loader is free to choose any of four encodings; the decoder
/// recognizes them in this priority:
///
/// 1. with a companion count `n`: packed little-endian u32 (`len == n·4`) or
///    u64 (`len == n·8`);
/// 2. without a usable `n`: packed u32 when `len` is a multiple of 4, packed
///    u64 when a multiple of 8;
/// 3. otherwise LEB128 varints — taken verbatim when the sequence is already
///    strictly increasing (row-id lists are sorted by construction), and as
///    deltas to accumulate otherwise.
pub fn decode_row_ids(blob: &[u8], n: Option<u64>) -> Result<Vec<RowId>, DecodeError> {
    if let Some(n) = n {
        let count = n as usize;
        if blob.len() == count * 4 {
            return Ok(decode_packed_u32(blob));
        }
        if blob.len() == count * 8 {
            return Ok(decode_packed_u64(blob));
        }
    }

    if blob.len() % 4 == 0 {
        return Ok(decode_packed_u32(blob));
    }
    if blob.len() % 8 == 0 {
        return Ok(decode_packed_u64(blob));
    }

    let vals = decode_varints(blob)?;
    if let Some(n) = n {
        if vals.len() as u64 != n {
            return Err(DecodeError::CountMismatch {
                expected: n,
                got: vals.len() as u64,
            });
        }
    }
    if is_strictly_increasing(&vals) {
        return Ok(vals);
    }
    accumulate_deltas(&vals)
}

fn decode_packed_u32(blob: &[u8]) -> Vec<RowId> {
    blob.chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]) as RowId)
        .collect()
}

fn decode_packed_u64(blob: &[u8]) -> Vec<RowId> {
    blob.chunks_exact(8)
        .map(|c| RowId::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect()
}

fn decode_varints(blob: &[u8]) -> Result<Vec<u64>, DecodeError> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < blob.len() {
        let start = i;
        let mut val: u64 = 0;
        let mut shift = 0u32;
        loop {
            let Some(&b) = blob.get(i) else {
                return Err(DecodeError::TruncatedVarint(start));
            };
            i += 1;
            if shift >= 64 {
                return Err(DecodeError::OversizedVarint(start));
            }
            val |= u64::from(b & 0x7f) << shift;
            if b & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        out.push(val);
    }
    Ok(out)
}

fn is_strictly_increasing(vals: &[u64]) -> bool {
    vals.windows(2).all(|w| w[0] < w[1])
}

fn accumulate_deltas(vals: &[u64]) -> Result<Vec<RowId>, DecodeError> {
    let mut out = Vec::with_capacity(vals.len());
    let mut acc: u64 = 0;
    for &v in vals {
        acc = acc.checked_add(v).ok_or(DecodeError::SumOverflow)?;
        out.push(acc);
    }
    Ok(out)
}
