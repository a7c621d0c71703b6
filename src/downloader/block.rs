//! Partitioning a descriptor list into fixed-size blocks.

use crate::RequestDescriptor;

/// Split `descriptors` into contiguous, order-preserving blocks of
/// `block_size` elements. The last block holds the remainder if the input
/// length is not a multiple of the block size.
///
/// The concatenation of the returned blocks equals the input exactly, and
/// the block count is `ceil(len / block_size)`. An empty input produces no
/// blocks.
///
/// # Panics
///
/// Panics if `block_size` is zero. Callers going through
/// [`crate::downloader::DownloadConfig::validate`] reject that earlier with
/// a proper error.
pub fn partition(descriptors: &[RequestDescriptor], block_size: usize) -> Vec<Vec<RequestDescriptor>> {
    assert!(block_size >= 1, "block size must be at least 1");
    descriptors
        .chunks(block_size)
        .map(<[RequestDescriptor]>::to_vec)
        .collect()
}
