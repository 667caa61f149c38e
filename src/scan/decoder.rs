use flate2::{Decompress, FlushDecompress, Status};
use thiserror::Error;

/// Growth step for the output buffer.
const CHUNK: usize = 64 * 1024;

/// Why a candidate range did not inflate.
///
/// Most candidate ranges are not deflate streams at all, so these are
/// expected and only ever cause the range to be skipped.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("corrupt deflate stream: {0}")]
    Corrupt(#[from] flate2::DecompressError),

    #[error("deflate stream truncated after {consumed} input bytes")]
    Truncated { consumed: usize },

    #[error("inflated size exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Inflate a raw deflate stream (no zlib or gzip framing).
///
/// The stream must reach its final block inside `input`; bytes after the
/// end of the stream are ignored. A stream that runs out of input early is
/// an error, and no partial output is returned.
pub fn inflate_raw(input: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let mut inflater = Decompress::new(false);
    // one byte past the limit is enough to tell that the limit was exceeded
    let cap = limit.saturating_add(1);
    let mut out = Vec::with_capacity(
        input
            .len()
            .saturating_mul(4)
            .clamp(CHUNK, CHUNK * 16)
            .min(cap),
    );

    loop {
        if out.len() == out.capacity() {
            let grow = out.capacity().max(CHUNK).min(cap - out.len());
            out.reserve_exact(grow);
        }

        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status = inflater.decompress_vec(&input[consumed..], &mut out, FlushDecompress::None)?;

        if out.len() > limit {
            return Err(DecodeError::TooLarge { limit });
        }

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() as usize == consumed && inflater.total_out() == produced;
                if stalled && out.len() < out.capacity() {
                    return Err(DecodeError::Truncated { consumed });
                }
            }
        }
    }
}
