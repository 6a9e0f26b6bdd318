// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::io::Write;
use std::pin::Pin;
use std::task::Poll;

use ring::digest;
use tokio::io::AsyncWrite;

use crate::{Algorithm, Hash};

#[cfg(test)]
#[path = "./sink_test.rs"]
mod sink_test;

/// A hash along with the number of bytes that were hashed to produce it
pub type HashResult = (Hash, u64);

#[derive(Clone)]
enum InnerContext {
    Md5(md5::Context),
    Ring(digest::Context),
}

/// A context for incremental (init, update, finish) digest calculation.
///
/// Contexts can be cloned to take a snapshot of the
/// calculation without disturbing it.
#[derive(Clone)]
pub struct Context {
    algorithm: Algorithm,
    inner: InnerContext,
}

impl Context {
    pub fn new(algorithm: Algorithm) -> Self {
        let inner = match algorithm {
            Algorithm::Md5 => InnerContext::Md5(md5::Context::new()),
            Algorithm::Sha1 => {
                InnerContext::Ring(digest::Context::new(&digest::SHA1_FOR_LEGACY_USE_ONLY))
            }
            Algorithm::Sha256 => InnerContext::Ring(digest::Context::new(&digest::SHA256)),
            Algorithm::Sha512 => InnerContext::Ring(digest::Context::new(&digest::SHA512)),
        };
        Self { algorithm, inner }
    }

    /// The algorithm that this context is calculating
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Add the given bytes to the digest calculation.
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            InnerContext::Md5(ctx) => ctx.consume(data),
            InnerContext::Ring(ctx) => ctx.update(data),
        }
    }

    /// Complete the calculation, returning the final hash.
    pub fn finish(self) -> Hash {
        match self.inner {
            InnerContext::Md5(ctx) => Hash::from_digest(self.algorithm, &ctx.compute().0),
            InnerContext::Ring(ctx) => Hash::from_digest(self.algorithm, ctx.finish().as_ref()),
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Context").field(&self.algorithm).finish()
    }
}

/// The HashSink calculates a [`Hash`] from the bytes written to it,
/// while counting the number of bytes seen.
///
/// The sink can be written to as a [`std::io::Write`] or a
/// [`tokio::io::AsyncWrite`]. Writes are applied to the hashing
/// context immediately; wrap the sink in a [`std::io::BufWriter`]
/// to coalesce many small writes.
///
/// Cloning a sink produces an independent sink with the same
/// state, which will diverge from the original as more data is written.
#[derive(Clone, Debug)]
pub struct HashSink {
    ctx: Context,
    bytes: u64,
}

impl HashSink {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            ctx: Context::new(algorithm),
            bytes: 0,
        }
    }

    /// The algorithm that this sink is calculating
    pub fn algorithm(&self) -> Algorithm {
        self.ctx.algorithm()
    }

    /// The total number of bytes written to this sink so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Add the given bytes to the hash.
    pub fn update(&mut self, data: &[u8]) {
        self.ctx.update(data);
        self.bytes += data.len() as u64;
    }

    /// Finalize the sink, returning the hash of everything
    /// written to it and the number of bytes written.
    pub fn finish(self) -> HashResult {
        (self.ctx.finish(), self.bytes)
    }

    /// The result that [`HashSink::finish`] would produce if it
    /// were called now, leaving this sink open for more data.
    pub fn current_hash(&self) -> HashResult {
        (self.ctx.clone().finish(), self.bytes)
    }
}

impl Write for HashSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl AsyncWrite for HashSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        self.update(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(
        self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(
        self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
