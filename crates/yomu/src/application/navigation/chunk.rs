use std::ops::Range;

/// Chapters shown per page of the chapter selector
pub const CHUNK_SIZE: usize = 25;

pub fn chunk_count(len: usize) -> usize {
    len.div_ceil(CHUNK_SIZE)
}

/// Chunk holding the chapter at `index`
pub fn chunk_of(index: usize) -> usize {
    index / CHUNK_SIZE
}

/// Chapter indices covered by `chunk`, empty past the last chunk
pub fn chunk_bounds(chunk: usize, len: usize) -> Range<usize> {
    let start = chunk.saturating_mul(CHUNK_SIZE).min(len);
    let end = start.saturating_add(CHUNK_SIZE).min(len);
    start..end
}

/// Steps `index` one position through `0..len`, wrapping at both ends
pub fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }

    let index = index % len;
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
