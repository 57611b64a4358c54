/*
 * Copyright (C) 2024 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Code30.
 *
 * Code30 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Code30 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Code30. If not, see <https://www.gnu.org/licenses/>.
 */

//! Streaming encoding and decoding over [`Read`] and [`Write`].

use super::decode::{decode_bytes_with, DecodeBytesError, DecodeConfig};
use super::decode::{DecodeError, InvalidUtf8};
use super::encode::{encode_to_chars_with, EncodeConfig};
use super::iter::{ErrAdapter, InspectBaseIterator};

use std::io::{self, BufReader, BufWriter, Read, Write};

/// Capacity of the buffers placed around the reader and the writer.
pub const BUFFER_SIZE: usize = 1024 * 1024;

/// [`Progress::report`] is called each time this many more bytes of binary
/// data have been processed.
pub const PROGRESS_INTERVAL: u64 = 1024 * 1024;

/// An error encountered while encoding or decoding a stream.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Reading the input failed.
    #[error("error reading input: {0}")]
    Read(#[source] io::Error),
    /// Writing or flushing the output failed.
    #[error("error writing output: {0}")]
    Write(#[source] io::Error),
    /// The input was not valid UTF-8.
    #[error("input is not valid Code30 data: {0}")]
    InvalidUtf8(#[from] InvalidUtf8),
    /// The input was not valid Code30 data.
    #[error("input is not valid Code30 data: {0}")]
    Decode(#[from] DecodeError),
}

impl From<DecodeBytesError> for StreamError {
    fn from(e: DecodeBytesError) -> Self {
        match e {
            DecodeBytesError::InvalidUtf8(e) => Self::InvalidUtf8(e),
            DecodeBytesError::DecodeError(e) => Self::Decode(e),
        }
    }
}

/// Alias of <code>[Result]\<T, [StreamError]></code>.
pub type StreamResult<T> = Result<T, StreamError>;

/// Observes how much binary data a stream operation has processed.
pub trait Progress {
    /// Called with the total number of binary bytes processed so far.
    fn report(&mut self, bytes: u64);
}

impl<F: FnMut(u64)> Progress for F {
    fn report(&mut self, bytes: u64) {
        self(bytes)
    }
}

/// A [`Progress`] that ignores all reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _bytes: u64) {}
}

type ReadBytes<R> = ErrAdapter<io::Bytes<BufReader<R>>, io::Error>;

fn read_bytes<R: Read>(reader: R) -> ReadBytes<R> {
    ErrAdapter::new(BufReader::with_capacity(BUFFER_SIZE, reader).bytes())
}

fn finish<W: Write>(mut writer: BufWriter<W>) -> StreamResult<()> {
    writer.flush().map_err(StreamError::Write)
}

/// Drops `writer` without flushing it. Output that already reached the
/// inner writer stays there; anything still buffered is lost.
fn abandon<W: Write>(writer: BufWriter<W>) {
    let (_, buffered) = writer.into_parts();
    let len = buffered.map_or(0, |b| b.len());
    log::debug!("discarding {} buffered bytes", len);
}

/// Encodes all data from `reader` and writes the UTF-8 result to `writer`.
///
/// Returns the number of bytes read.
pub fn encode_stream<R, W>(
    reader: R,
    writer: W,
    config: EncodeConfig,
) -> StreamResult<u64>
where
    R: Read,
    W: Write,
{
    encode_stream_with_progress(reader, writer, config, &mut NoProgress)
}

/// Like [`encode_stream`], but reports progress to `progress`.
pub fn encode_stream_with_progress<R, W, P>(
    reader: R,
    writer: W,
    config: EncodeConfig,
    progress: &mut P,
) -> StreamResult<u64>
where
    R: Read,
    W: Write,
    P: Progress + ?Sized,
{
    log::debug!("encoding stream (wrap width {})", config.wrap_width);
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, writer);
    let mut encoder = encode_to_chars_with(read_bytes(reader), config);
    let mut reported = 0;
    let mut utf8 = [0; 4];

    while let Some(c) = encoder.next() {
        let s = c.encode_utf8(&mut utf8);
        if let Err(e) = writer.write_all(s.as_bytes()) {
            let consumed = encoder.bytes_consumed();
            log::warn!("write failed after {} bytes", consumed);
            abandon(writer);
            return Err(StreamError::Write(e));
        }
        let consumed = encoder.bytes_consumed();
        if consumed != reported && consumed % PROGRESS_INTERVAL == 0 {
            reported = consumed;
            progress.report(consumed);
        }
    }

    let consumed = encoder.bytes_consumed();
    if let Some(e) = encoder.base_iterator().take_err() {
        log::warn!("read failed after {} bytes", consumed);
        abandon(writer);
        return Err(StreamError::Read(e));
    }
    finish(writer)?;
    log::debug!("encoded {} bytes", consumed);
    Ok(consumed)
}

/// Decodes all UTF-8 Code30 data from `reader` and writes the result to
/// `writer`.
///
/// Returns the number of bytes written.
pub fn decode_stream<R, W>(
    reader: R,
    writer: W,
    config: DecodeConfig,
) -> StreamResult<u64>
where
    R: Read,
    W: Write,
{
    decode_stream_with_progress(reader, writer, config, &mut NoProgress)
}

/// Like [`decode_stream`], but reports progress to `progress`.
pub fn decode_stream_with_progress<R, W, P>(
    reader: R,
    writer: W,
    config: DecodeConfig,
    progress: &mut P,
) -> StreamResult<u64>
where
    R: Read,
    W: Write,
    P: Progress + ?Sized,
{
    log::debug!(
        "decoding stream (truncate overflow: {})",
        config.truncate_overflow,
    );
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, writer);
    let mut decoder = decode_bytes_with(read_bytes(reader), config);

    loop {
        let item = decoder.next();
        // A failed read ends the input early; report it instead of whatever
        // the decoder made of the truncated input.
        if !matches!(item, Some(Ok(_))) {
            if let Some(e) = decoder.base_iterator().take_err() {
                log::warn!(
                    "read failed after {} bytes",
                    decoder.bytes_produced(),
                );
                abandon(writer);
                return Err(StreamError::Read(e));
            }
        }
        let b = match item {
            Some(Ok(b)) => b,
            Some(Err(e)) => {
                log::warn!(
                    "invalid input after {} bytes: {}",
                    decoder.bytes_produced(),
                    e,
                );
                abandon(writer);
                return Err(e.into());
            }
            None => break,
        };
        if let Err(e) = writer.write_all(&[b]) {
            let produced = decoder.bytes_produced();
            log::warn!("write failed after {} bytes", produced);
            abandon(writer);
            return Err(StreamError::Write(e));
        }
        let produced = decoder.bytes_produced();
        if produced % PROGRESS_INTERVAL == 0 {
            progress.report(produced);
        }
    }

    finish(writer)?;
    let produced = decoder.bytes_produced();
    log::debug!("decoded {} bytes", produced);
    Ok(produced)
}
